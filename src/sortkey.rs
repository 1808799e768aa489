//! Natural sort keys for segment file names.
//!
//! Lexical ordering puts "chapter 11" before "chapter 2". Padding every run
//! of digits to a minimum width restores numeric ordering while keeping the
//! key an ordinary string, so plain string comparison sorts correctly and no
//! custom comparator is needed.

/// Minimum width digit runs are padded to.
///
/// Runs of four or more digits exceed this width and keep lexical behavior
/// ("chapter 999" sorts after "chapter 1000"); callers that need wider runs
/// can raise the width through configuration.
pub const DEFAULT_PAD_WIDTH: usize = 3;

/// Replace every maximal run of ASCII decimal digits in `name` with the same
/// run left-padded with zeros to at least `width` characters. Non-digit
/// characters are copied unchanged; runs already at or above `width` are not
/// truncated.
///
/// Pure and total over all strings. Applying it twice yields the same result
/// as applying it once.
#[must_use]
pub fn pad_numeric_runs(name: &str, width: usize) -> String {
    let mut key = String::with_capacity(name.len() + width);
    let mut run = String::new();

    for ch in name.chars() {
        if ch.is_ascii_digit() {
            run.push(ch);
        } else {
            flush_run(&mut key, &mut run, width);
            key.push(ch);
        }
    }
    flush_run(&mut key, &mut run, width);
    key
}

fn flush_run(key: &mut String, run: &mut String, width: usize) {
    if run.is_empty() {
        return;
    }
    for _ in run.len()..width {
        key.push('0');
    }
    key.push_str(run);
    run.clear();
}
