//! Output formatting for the CLI

use crate::pipeline::TrainingResult;

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format `count` with its share of `total` as a percentage
pub fn format_share(count: usize, total: usize) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    };
    format!("{} ({percent:.1}%)", format_number(count))
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, &str)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Print the outcome totals of a training run
pub fn print_training_result(result: &TrainingResult) {
    let total = result.total_episodes;
    let episodes = format_number(total);
    let x_wins = format_share(result.x_wins, total);
    let o_wins = format_share(result.o_wins, total);
    let ties = format_share(result.ties, total);
    let length = format!("{:.2} plies", result.average_length);
    let table = format!("{} states", format_number(result.table_size));
    let elapsed = format!("{:.2} s", result.elapsed_seconds);

    print_stats_table(&[
        ("Episodes", &episodes),
        ("X wins", &x_wins),
        ("0 wins", &o_wins),
        ("Ties", &ties),
        ("Average length", &length),
        ("Table size", &table),
        ("Elapsed", &elapsed),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(50_000), "50,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(1, 4), "1 (25.0%)");
        assert_eq!(format_share(0, 0), "0 (0.0%)");
    }
}
