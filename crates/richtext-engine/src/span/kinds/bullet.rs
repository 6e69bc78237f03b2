use serde::{Deserialize, Serialize};

/// List item marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletSpan {
    /// Nesting depth, 1 for a top-level list.
    pub depth: u8,
    /// Item number for ordered lists, `None` for bullets.
    pub ordinal: Option<u32>,
}

impl BulletSpan {
    pub fn marker(&self) -> String {
        match self.ordinal {
            Some(n) => format!("{n}."),
            None => "•".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        let bullet = BulletSpan {
            depth: 1,
            ordinal: None,
        };
        let numbered = BulletSpan {
            depth: 2,
            ordinal: Some(3),
        };
        assert_eq!(bullet.marker(), "•");
        assert_eq!(numbered.marker(), "3.");
    }
}
