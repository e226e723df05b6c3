use instant::{Duration, Instant};

pub fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let tt = Instant::now();
    let val = f();

    (val, tt.elapsed())
}

#[cfg(feature = "metrics")]
pub fn report(label: &str, tt: Duration) {
    log::info!("{}: {}", label, humantime::format_duration(tt));
}

#[cfg(not(feature = "metrics"))]
pub fn report(_label: &str, _tt: Duration) {
    //
}
