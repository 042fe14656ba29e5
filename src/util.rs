//! Shared helpers for byte-count parsing and formatting

/// Parses a byte count with an optional `K`/`M`/`G` suffix.
///
/// Mirrors the size convention of the lock manager's own init tool, where
/// alignments are spelled `1M`, `2M`, and so on. Suffixes are binary
/// multipliers and case-insensitive; a bare number is taken as bytes.
pub fn parse_byte_size(input: &str) -> Result<u64, String> {
   let trimmed = input.trim();
   if trimmed.is_empty() {
      return Err("empty byte count".to_string());
   }

   let (digits, multiplier) = match trimmed.as_bytes().last() {
      Some(b'k' | b'K') => (&trimmed[..trimmed.len() - 1], 1u64 << 10),
      Some(b'm' | b'M') => (&trimmed[..trimmed.len() - 1], 1u64 << 20),
      Some(b'g' | b'G') => (&trimmed[..trimmed.len() - 1], 1u64 << 30),
      _ => (trimmed, 1u64),
   };

   let value: u64 = digits
      .trim()
      .parse()
      .map_err(|_| format!("invalid byte count: {input}"))?;

   value
      .checked_mul(multiplier)
      .ok_or_else(|| format!("byte count overflows: {input}"))
}

/// Formats a byte count as a human-readable size string
pub fn format_size(bytes: u64) -> String {
   const KB: u64 = 1024;
   const MB: u64 = KB * 1024;
   const GB: u64 = MB * 1024;

   if bytes < KB {
      format!("{bytes} B")
   } else if bytes < MB {
      format!("{:.1} KB", bytes as f64 / KB as f64)
   } else if bytes < GB {
      format!("{:.1} MB", bytes as f64 / MB as f64)
   } else {
      format!("{:.1} GB", bytes as f64 / GB as f64)
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn parses_plain_byte_counts() {
      assert_eq!(parse_byte_size("0"), Ok(0));
      assert_eq!(parse_byte_size("512"), Ok(512));
      assert_eq!(parse_byte_size(" 4096 "), Ok(4096));
   }

   #[test]
   fn parses_suffixed_byte_counts() {
      assert_eq!(parse_byte_size("4k"), Ok(4096));
      assert_eq!(parse_byte_size("4K"), Ok(4096));
      assert_eq!(parse_byte_size("1M"), Ok(1 << 20));
      assert_eq!(parse_byte_size("2m"), Ok(2 << 20));
      assert_eq!(parse_byte_size("1G"), Ok(1 << 30));
   }

   #[test]
   fn rejects_garbage() {
      assert!(parse_byte_size("").is_err());
      assert!(parse_byte_size("M").is_err());
      assert!(parse_byte_size("12Q").is_err());
      assert!(parse_byte_size("-1").is_err());
      assert!(parse_byte_size("1.5M").is_err());
   }

   #[test]
   fn rejects_overflow() {
      assert!(parse_byte_size("18446744073709551615").is_ok());
      assert!(parse_byte_size("18446744073709551616").is_err());
      assert!(parse_byte_size("17179869184G").is_err());
   }

   #[test]
   fn formats_sizes() {
      assert_eq!(format_size(512), "512 B");
      assert_eq!(format_size(1024), "1.0 KB");
      assert_eq!(format_size(1 << 20), "1.0 MB");
      assert_eq!(format_size(3 << 30), "3.0 GB");
   }
}
