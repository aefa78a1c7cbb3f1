// src/format.rs
//! Delimited output lines. Fields are not escaped; a field containing the
//! separator makes the line ambiguous.

use crate::join::JoinedRecord;

/// Header of the output file.
pub const HEADER: &str = "Estado;Ano;Mes;Chuva;Dengue";

pub const OUTPUT_SEPARATOR: char = ';';

/// Shortest round-trip form with at least one fractional digit: `10.0`, `15.2`.
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

/// `state;year;month;rainfall;dengue`
pub fn format_line(record: &JoinedRecord, sep: char) -> String {
    [
        record.state.clone(),
        record.year.clone(),
        record.month.clone(),
        format_value(record.rainfall),
        format_value(record.dengue),
    ]
    .join(sep.to_string().as_str())
}

/// Header with the default column names joined by `sep`.
pub fn header(sep: char) -> String {
    if sep == OUTPUT_SEPARATOR {
        HEADER.to_string()
    } else {
        HEADER.replace(OUTPUT_SEPARATOR, &sep.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn values_keep_a_fractional_digit() {
        assert_eq!(format_value(10.0), "10.0");
        assert_eq!(format_value(15.2), "15.2");
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(169.0), "169.0");
        assert_eq!(format_value(1234.5), "1234.5");
    }

    #[test]
    fn formats_example_record() -> Result<()> {
        let rec = JoinedRecord::decompose("CE-2015-08", 15.2, 10.0)?;
        assert_eq!(format_line(&rec, OUTPUT_SEPARATOR), "CE;2015;08;15.2;10.0");
        Ok(())
    }

    #[test]
    fn line_splits_back_into_five_fields() -> Result<()> {
        let rec = JoinedRecord::decompose("SP-2016-12", 7.6, 29.0)?;
        let line = format_line(&rec, OUTPUT_SEPARATOR);
        let fields: Vec<&str> = line.split(OUTPUT_SEPARATOR).collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(&fields[..3], ["SP", "2016", "12"]);
        assert_eq!(fields[3].parse::<f64>().ok(), Some(rec.rainfall));
        assert_eq!(fields[4].parse::<f64>().ok(), Some(rec.dengue));
        Ok(())
    }

    #[test]
    fn header_follows_separator() {
        assert_eq!(header(';'), HEADER);
        assert_eq!(header(','), "Estado,Ano,Mes,Chuva,Dengue");
    }
}
