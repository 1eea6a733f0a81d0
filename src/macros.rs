/// Similar to the `info!` macro in tracing.
/// Passing a starting time as the first argument also prints how long it
/// took from that instant to now.
/// ```
/// use genscrape::info_time;
///
/// info_time!("str {}, {}", 1, 2);
/// let time = chrono::Local::now();
/// info_time!(time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = ::chrono::Local::now();
        println!(
            "{} | {}",
            local_now.format("%H:%M:%S%.3f"),
            format!($strfm, $($arg),*)
        );
    }};
    ($time:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let local_now = ::chrono::Local::now();
        let run_time = (local_now - $time)
            .num_microseconds()
            .map(|us| us as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        println!(
            "{} | {} ({:.3} sec)",
            local_now.format("%H:%M:%S%.3f"),
            format!($strfm, $($arg),*),
            run_time
        );
    }};
}
