//! Built-in example trade log.

/// Six futures trades over three days; loaded by the "example" action.
pub const EXAMPLE_CSV: &str = "time,symbol,side,price,qty,pl
2025-01-10 09:15,ES,BUY,4500.5,1,150
2025-01-10 10:20,ES,SELL,4510.0,1,-50
2025-01-11 11:05,NQ,BUY,18500.0,1,200
2025-01-11 12:30,ES,BUY,4520.0,1,120
2025-01-12 09:50,NQ,SELL,18400.0,1,-80
2025-01-12 14:10,ES,SELL,4490.0,1,75";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_has_header_and_six_rows() {
        let lines: Vec<&str> = EXAMPLE_CSV.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "time,symbol,side,price,qty,pl");
    }
}
