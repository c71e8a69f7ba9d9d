use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Artificial delay standing in for network latency
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Latency {
    /// Resume immediately (tests)
    #[default]
    None,
    Fixed(Duration),
    /// Uniformly random between `min` and `max`
    Uniform { min: Duration, max: Duration },
}

impl Latency {
    pub fn sample(&self) -> Duration {
        match self {
            Latency::None => Duration::ZERO,
            Latency::Fixed(delay) => *delay,
            Latency::Uniform { min, max } => {
                if max <= min {
                    return *min;
                }
                rand::thread_rng().gen_range(*min..=*max)
            }
        }
    }

    /// Suspend once for a sampled delay. Not cancellable.
    pub async fn wait(&self) {
        let delay = self.sample();
        if delay.is_zero() {
            return;
        }
        debug!("Simulating latency of {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
