use prometheus::{Counter, Histogram, HistogramOpts, Opts};

lazy_static::lazy_static!(
    pub static ref TRANSFERS_REGISTERED_TOTAL: Counter =
        counter("transfers_registered_total", "Total number of registered transfers");

    pub static ref TRANSFERS_COMPLETED_TOTAL: Counter =
        counter("transfers_completed_total", "Total number of completed transfers");

    pub static ref TRANSFERS_CONFIRMED_TOTAL: Counter =
        counter("transfers_confirmed_total", "Total number of confirmed transfers");

    pub static ref TRANSFERS_CANCELLED_TOTAL: Counter =
        counter("transfers_cancelled_total", "Total number of cancelled transfers");

    pub static ref TRANSFERS_FAILED_TOTAL: Counter =
        counter("transfers_failed_total", "Total number of transfers rejected by validation");


    pub static ref TRANSFER_REGISTER_TIME_SECONDS: Histogram =
        histogram("transfer_register_time_seconds", "Total time spent registering transfers in seconds");

    pub static ref TRANSFER_TRANSITION_TIME_SECONDS: Histogram =
        histogram("transfer_transition_time_seconds", "Total time spent transitioning transfers in seconds");
);

fn counter(name: &str, help: &str) -> Counter {
    let counter = Counter::with_opts(Opts::new(name, help)).expect("invalid counter options");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("duplicate metric registration");
    counter
}

fn histogram(name: &str, help: &str) -> Histogram {
    let buckets = prometheus::exponential_buckets(1e-6, 4.0, 10).expect("invalid bucket layout");
    let histogram = Histogram::with_opts(HistogramOpts::new(name, help).buckets(buckets))
        .expect("invalid histogram options");
    prometheus::default_registry()
        .register(Box::new(histogram.clone()))
        .expect("duplicate metric registration");
    histogram
}
