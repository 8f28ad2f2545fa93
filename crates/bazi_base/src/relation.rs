//! Stem combinations (天干五合) and branch clashes (地支六冲).

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

/// The five combining stem pairs with their resultant element.
pub const STEM_COMBINATIONS: [(Stem, Stem, Element); 5] = [
    (Stem::Jia, Stem::Ji, Element::Earth),
    (Stem::Yi, Stem::Geng, Element::Metal),
    (Stem::Bing, Stem::Xin, Element::Water),
    (Stem::Ding, Stem::Ren, Element::Wood),
    (Stem::Wu, Stem::Gui, Element::Fire),
];

/// The six clashing branch pairs.
pub const BRANCH_CLASHES: [(Branch, Branch); 6] = [
    (Branch::Zi, Branch::Wu),
    (Branch::Chou, Branch::Wei),
    (Branch::Yin, Branch::Shen),
    (Branch::Mao, Branch::You),
    (Branch::Chen, Branch::Xu),
    (Branch::Si, Branch::Hai),
];

/// Resultant element if `a` and `b` combine, in either order.
pub fn stem_combination(a: Stem, b: Stem) -> Option<Element> {
    STEM_COMBINATIONS
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, e)| e)
}

/// Whether two branches clash, in either order.
pub fn branches_clash(a: Branch, b: Branch) -> bool {
    BRANCH_CLASHES
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}
