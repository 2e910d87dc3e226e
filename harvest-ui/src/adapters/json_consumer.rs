use std::io::Write;

use anyhow::Context;
use harvest_core::{CalculationConsumer, CalculationRequest};
use tracing::info;

/// Hands each request to the recommendation engine as one JSON object per
/// line on `writer`.
pub struct JsonLinesConsumer<W: Write> {
    writer: W,
    submitted: usize,
}

impl<W: Write> JsonLinesConsumer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            submitted: 0,
        }
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CalculationConsumer for JsonLinesConsumer<W> {
    fn consume(
        &mut self,
        request: CalculationRequest,
    ) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, &request)
            .context("failed to serialize calculation request")?;
        writeln!(self.writer).context("failed to write calculation request")?;
        self.writer.flush()?;
        self.submitted += 1;
        info!(budget = request.budget(), "calculation request submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use harvest_core::LatLng;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn writes_camel_case_json_line() {
        let mut consumer = JsonLinesConsumer::new(Vec::new());
        let request = CalculationRequest::new(LatLng::new(12.5, 77.25), 100.0, 50.0, 50_000);

        consumer.consume(request).unwrap();

        let output = String::from_utf8(consumer.into_inner()).unwrap();
        assert_eq!(
            output,
            "{\"location\":{\"latitude\":12.5,\"longitude\":77.25},\"rooftopArea\":100.0,\"openSpaceArea\":50.0,\"budget\":50000}\n"
        );
    }

    #[test]
    fn counts_submissions() {
        let mut consumer = JsonLinesConsumer::new(Vec::new());

        for budget in [20_000, 30_000] {
            consumer
                .consume(CalculationRequest::new(LatLng::new(0.0, 0.0), 1.0, 1.0, budget))
                .unwrap();
        }

        assert_eq!(consumer.submitted(), 2);
    }
}
