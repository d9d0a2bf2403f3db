/// Elements that participate in resonance chemistry.
///
/// This is a deliberately small slice of the periodic table: the elements
/// that can hold radicals, lone pairs, or multiple bonds in the systems
/// this crate enumerates. Anything else cannot appear in a `Molecule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Element {
    H = 1,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Br = 35,
    I = 53,
}

impl Element {
    pub fn from_atomic_num(n: u8) -> Option<Element> {
        match n {
            1 => Some(Element::H),
            5 => Some(Element::B),
            6 => Some(Element::C),
            7 => Some(Element::N),
            8 => Some(Element::O),
            9 => Some(Element::F),
            14 => Some(Element::Si),
            15 => Some(Element::P),
            16 => Some(Element::S),
            17 => Some(Element::Cl),
            35 => Some(Element::Br),
            53 => Some(Element::I),
            _ => None,
        }
    }

    pub fn atomic_num(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
        }
    }

    /// Outer-shell electron count. This is the fixed per-element budget
    /// that bonds, lone pairs, radicals, and charge must add up to.
    pub fn valence_electrons(self) -> u8 {
        match self {
            Element::H => 1,
            Element::B => 3,
            Element::C | Element::Si => 4,
            Element::N | Element::P => 5,
            Element::O | Element::S => 6,
            Element::F | Element::Cl | Element::Br | Element::I => 7,
        }
    }

    /// Whether the element can sit in an aromatic (sp2) ring.
    pub fn sp2_capable(self) -> bool {
        matches!(
            self,
            Element::B | Element::C | Element::N | Element::O | Element::P | Element::S
        )
    }
}
