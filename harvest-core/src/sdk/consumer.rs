use crate::models::CalculationRequest;

/// The recommendation engine that receives a validated request.
///
/// Ownership of the request passes to the consumer.
pub trait CalculationConsumer {
    fn consume(
        &mut self,
        request: CalculationRequest,
    ) -> anyhow::Result<()>;
}

impl<F> CalculationConsumer for F
where
    F: FnMut(CalculationRequest) -> anyhow::Result<()>,
{
    fn consume(
        &mut self,
        request: CalculationRequest,
    ) -> anyhow::Result<()> {
        self(request)
    }
}
