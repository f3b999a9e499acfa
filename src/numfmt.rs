// Half-up rounding for the percentages shown in insight text.

pub fn whole(value: f64) -> String {
    format!("{:.0}", value.round())
}

pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(whole(62.5), "63");
        assert_eq!(whole(57.14), "57");
        assert_eq!(one_decimal(33.333), "33.3");
        assert_eq!(one_decimal(100.0), "100.0");
    }
}
