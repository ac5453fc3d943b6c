//! Utilities for displaying a progress monitor to track compression/decompression
//!
//! This implementation relies heavily on the `indicatif` crate, see <https://docs.rs/indicatif>

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use indicatif::{style::TemplateError, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// A generic wrapper around a reader that keeps track of how many bytes have been read
/// from the total.
///
/// Both the compressor and the decompressor rewind their input, so every byte read counts,
/// including the ones read a second time. `total` has to account for that.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read
    pub total: u64,
    /// Amount read so far
    pub read: u64,
    /// The internal reader
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    /// Create a new progress monitor, initialized with zero bytes read
    pub fn new(reader: R, total: u64, hidden: bool) -> Result<Self, TemplateError> {
        // https://docs.rs/indicatif/latest/indicatif/index.html#templates
        let style = ProgressStyle::with_template(
            "{wide_bar} {binary_bytes}/{binary_total_bytes}  \n[est. {eta} remaining]",
        )?;
        let progress_bar = ProgressBar::new(total).with_style(style);
        if hidden {
            progress_bar.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            // The default is 20hz, this reduces rendering overhead
            progress_bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
        }
        Ok(Self {
            reader,
            total,
            read: 0,
            progress_bar,
        })
    }

    /// Clear the bar and log how long the whole thing took.
    pub fn finish(&self, what: &str) {
        if self.progress_bar.is_finished() {
            return;
        }
        self.progress_bar.finish_and_clear();
        let elapsed = self.progress_bar.elapsed();
        let rate = if elapsed.is_zero() {
            String::from("-")
        } else {
            fmt_size(self.read as f64 / elapsed.as_secs_f64())
        };
        info!(
            "{what} {} in {} ({rate}/s avg)",
            fmt_size(self.read as f64),
            fmt_duration(elapsed),
        );
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // Fall back on the internally stored reader, but filch the number of bytes read
        // along the way
        let out = self.reader.read(buf)?;
        self.read += out as u64;
        self.progress_bar.set_position(self.read.min(self.total));
        Ok(out)
    }
}

impl<R: Read + Seek> Seek for ProgressMonitor<R> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.reader.seek(pos)
    }
}

/// Converts a quantity in bytes to a human readable size, "GiB, MiB, KiB, etc"
pub fn fmt_size(size_in_bytes: f64) -> String {
    let units = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    let mut unit_index = 0;
    let mut decimal = size_in_bytes;
    // Move to the next unit once there are more than 3 figures before the decimal
    while decimal >= 1000.0 && unit_index < units.len() - 1 {
        decimal /= 1024.0;
        unit_index += 1;
    }
    // Only use a decimal if displaying a unit larger than a byte
    if unit_index > 0 {
        format!("{:.2}{}", decimal, units[unit_index])
    } else {
        format!("{:.0}{}", decimal, units[unit_index])
    }
}

/// Converts a [`std::time::Duration`] to a human readable format
pub fn fmt_duration(duration: Duration) -> String {
    let as_secs = duration.as_secs_f64();
    let whole_secs = duration.as_secs();
    let secs_portion = as_secs % 60.0;
    let min_portion = (whole_secs / 60) % 60;
    let hr_portion = whole_secs / 3600;

    let mut parts = Vec::with_capacity(3);
    if hr_portion > 0 {
        parts.push(format!("{hr_portion}h"));
    }
    if min_portion > 0 {
        parts.push(format!("{min_portion}m"));
    }
    // Formatting for seconds is fairly manual
    // to provide a "useful" level of precision
    if as_secs > 60.0 {
        if secs_portion >= 0.5 {
            parts.push(format!("{:.0}s", secs_portion.round()));
        }
    } else if secs_portion > 4.0 {
        parts.push(format!("{secs_portion:.1}s"));
    } else if secs_portion > 1.0 {
        parts.push(format!("{secs_portion:.2}s"));
    } else if secs_portion > 0.0 {
        // Display as ms with two units of precision
        parts.push(format!("{:.2}ms", secs_portion * 1000.0));
    }
    parts.join(" ")
}
