//! The five elements (五行) and yin/yang polarity.
//!
//! Elements are ordered along the generating cycle:
//! Wood → Fire → Earth → Metal → Water → Wood.
//! The controlling cycle skips one step: Wood → Earth → Water → Fire → Metal → Wood.

use serde::{Deserialize, Serialize};

/// The five elements in generating-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All 5 elements in generating-cycle order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// Chinese name (木火土金水).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// English name.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// 0-based index (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Element at a cyclic offset from this one.
    pub const fn offset(self, steps: u8) -> Self {
        ALL_ELEMENTS[((self.index() + steps) % 5) as usize]
    }

    /// The element this one generates (我生).
    pub const fn generates(self) -> Self {
        self.offset(1)
    }

    /// The element this one controls (我克).
    pub const fn controls(self) -> Self {
        self.offset(2)
    }

    /// The element that controls this one (克我).
    pub const fn controlled_by(self) -> Self {
        self.offset(3)
    }

    /// The element that generates this one (生我).
    pub const fn generated_by(self) -> Self {
        self.offset(4)
    }
}

/// Yin/yang polarity of a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Polarity from a 0-based alphabet index: even = yang.
    pub const fn from_index(index: u8) -> Self {
        if index % 2 == 0 { Self::Yang } else { Self::Yin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generating_cycle_closes() {
        for e in ALL_ELEMENTS {
            let mut x = e;
            for _ in 0..5 {
                x = x.generates();
            }
            assert_eq!(x, e);
        }
    }

    #[test]
    fn wood_relations() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Wood.controlled_by(), Element::Metal);
        assert_eq!(Element::Wood.generated_by(), Element::Water);
    }

    #[test]
    fn indices_sequential() {
        for (i, e) in ALL_ELEMENTS.iter().enumerate() {
            assert_eq!(e.index() as usize, i);
        }
    }
}
