/// Category flags for a type (bit set)
///
/// A union type carries the flags of all of its members, so `string | null`
/// reports both `STRING_LIKE` and `NULLISH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeFlags(u16);

impl TypeFlags {
    /// No information
    pub const NONE: Self = Self(0);
    /// The `any` escape hatch
    pub const ANY: Self = Self(1 << 0);
    /// `unknown`
    pub const UNKNOWN: Self = Self(1 << 1);
    /// `never`
    pub const NEVER: Self = Self(1 << 2);
    /// `null` or `undefined`
    pub const NULLISH: Self = Self(1 << 3);
    /// Booleans and boolean literal types
    pub const BOOLEAN_LIKE: Self = Self(1 << 4);
    /// Numbers and numeric literal types
    pub const NUMBER_LIKE: Self = Self(1 << 5);
    /// Strings and string literal types
    pub const STRING_LIKE: Self = Self(1 << 6);
    /// Big integers
    pub const BIGINT_LIKE: Self = Self(1 << 7);
    /// Objects, arrays, functions
    pub const OBJECT: Self = Self(1 << 8);

    #[inline]
    pub const fn empty() -> Self {
        Self::NONE
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// All of `other`'s bits are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// At least one of `other`'s bits is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for TypeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for TypeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
