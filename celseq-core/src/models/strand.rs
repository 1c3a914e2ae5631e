use std::fmt::{self, Display};
use std::str::FromStr;

///
/// Strand of a genomic feature or read.
///
/// Anything other than `+` or `-` (typically `.` or `?` in GTF/GFF files)
/// is treated as [Strand::Unknown].
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Unknown,
}

impl Strand {
    pub fn from_char(c: char) -> Strand {
        match c {
            '+' => Strand::Plus,
            '-' => Strand::Minus,
            _ => Strand::Unknown,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unknown => '.',
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Strand::Unknown)
    }
}

impl FromStr for Strand {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        Ok(match (chars.next(), chars.next()) {
            (Some(c), None) => Strand::from_char(c),
            _ => Strand::Unknown,
        })
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("+", Strand::Plus)]
    #[case("-", Strand::Minus)]
    #[case(".", Strand::Unknown)]
    #[case("?", Strand::Unknown)]
    #[case("++", Strand::Unknown)]
    #[case("", Strand::Unknown)]
    fn test_parse_strand(#[case] input: &str, #[case] expected: Strand) {
        assert_eq!(Strand::from_str(input).unwrap(), expected);
    }

    #[rstest]
    fn test_strand_display_round_trips() {
        for strand in [Strand::Plus, Strand::Minus, Strand::Unknown] {
            let parsed: Strand = strand.to_string().parse().unwrap();
            assert_eq!(parsed, strand);
        }
    }
}
