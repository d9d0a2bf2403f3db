/// Bond multiplicity, including the delocalized aromatic (benzene) order.
///
/// `Benzene` is the 1.5-order bond used for fully delocalized rings. Only
/// aromatic reconciliation and Clar sextet assignment produce it; electron
/// shifts never do, and it cannot be shifted further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Benzene,
}

impl BondOrder {
    pub fn order_value(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Benzene => 1.5,
        }
    }

    /// One order higher, if that is a legal concrete order.
    pub fn incremented(self) -> Option<BondOrder> {
        match self {
            BondOrder::Single => Some(BondOrder::Double),
            BondOrder::Double => Some(BondOrder::Triple),
            BondOrder::Triple | BondOrder::Benzene => None,
        }
    }

    /// One order lower, if that is a legal concrete order.
    pub fn decremented(self) -> Option<BondOrder> {
        match self {
            BondOrder::Double => Some(BondOrder::Single),
            BondOrder::Triple => Some(BondOrder::Double),
            BondOrder::Single | BondOrder::Benzene => None,
        }
    }

    pub fn is_single(self) -> bool {
        self == BondOrder::Single
    }

    pub fn is_double(self) -> bool {
        self == BondOrder::Double
    }

    pub fn is_benzene(self) -> bool {
        self == BondOrder::Benzene
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bond {
    pub order: BondOrder,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self { order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_ladder() {
        assert_eq!(BondOrder::Single.incremented(), Some(BondOrder::Double));
        assert_eq!(BondOrder::Double.incremented(), Some(BondOrder::Triple));
        assert_eq!(BondOrder::Triple.incremented(), None);
        assert_eq!(BondOrder::Triple.decremented(), Some(BondOrder::Double));
        assert_eq!(BondOrder::Double.decremented(), Some(BondOrder::Single));
        assert_eq!(BondOrder::Single.decremented(), None);
    }

    #[test]
    fn benzene_is_not_shiftable() {
        assert_eq!(BondOrder::Benzene.incremented(), None);
        assert_eq!(BondOrder::Benzene.decremented(), None);
    }

    #[test]
    fn shift_is_reversible() {
        for order in [BondOrder::Single, BondOrder::Double] {
            let up = order.incremented().unwrap();
            assert_eq!(up.decremented(), Some(order));
        }
    }

    #[test]
    fn order_values() {
        assert_eq!(BondOrder::Single.order_value(), 1.0);
        assert_eq!(BondOrder::Benzene.order_value(), 1.5);
    }
}
