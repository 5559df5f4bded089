use num_traits::{One, PrimInt};

/// Storage used for collision layer masks.
pub type LayerBits = u32;

/// Mask of collision layers a ray cast is allowed to hit.
pub type LayerMask = BitmaskFlags<LayerBits>;

/// Trait implemented by layer enums declared with [`define_bitmask_flags!`].
///
/// The enum's discriminant (via `#[repr(u8)]`) is the bit index. The backing integer is
/// chosen through the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A plain bitmask container.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    /// Every bit set.
    pub fn all() -> Self {
        Self { bits: !T::zero() }
    }

    /// No bit set.
    pub fn none() -> Self {
        Self { bits: T::zero() }
    }

    /// Build a mask from a list of flags.
    pub fn from_flags<U: FlagBitmask<Storage = T> + Copy>(flags: &[U]) -> Self {
        let mut mask = Self::none();
        mask.add_many(flags);
        mask
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits | flag.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, flag: U) {
        self.bits = self.bits & !flag.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, flag: U) -> bool {
        (self.bits & flag.mask()) != T::zero()
    }

    pub fn add_many<U: FlagBitmask<Storage = T> + Copy>(&mut self, flags: &[U]) {
        for &flag in flags {
            self.add(flag);
        }
    }

    /// Inverted mask, e.g. "everything but the excluded layers".
    pub fn complement(&self) -> Self {
        Self { bits: !self.bits }
    }

    /// True when the two masks share at least one bit.
    pub fn intersects(&self, other: &Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Declare a bitmask-backed enum and implement `FlagBitmask` for it.
///
/// Example:
/// ```rust
/// shared::define_bitmask_flags!(SceneLayer, u32, {
///     Default,
///     Ground,
///     Props,
/// });
/// ```
#[macro_export]
macro_rules! define_bitmask_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::bitmask_flags::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_bitmask_flags!(TestLayer, u32, { Default, Ground, Props, Hands });

    #[test]
    fn from_flags_sets_only_listed_bits() {
        let mask = LayerMask::from_flags(&[TestLayer::Ground, TestLayer::Hands]);

        assert!(mask.has(TestLayer::Ground));
        assert!(mask.has(TestLayer::Hands));
        assert!(!mask.has(TestLayer::Default));
        assert!(!mask.has(TestLayer::Props));
        assert_eq!(mask.bits, 0b1010);
    }

    #[test]
    fn complement_of_exclusions_keeps_everything_else() {
        let excluded = LayerMask::from_flags(&[TestLayer::Hands]);
        let castable = excluded.complement();

        assert!(!castable.has(TestLayer::Hands));
        assert!(castable.has(TestLayer::Ground));
        assert!(castable.has(TestLayer::Props));
        assert!(LayerMask::none().complement() == LayerMask::all());
    }

    #[test]
    fn intersects_requires_a_shared_bit() {
        let ground = LayerMask::from_flags(&[TestLayer::Ground]);
        let props = LayerMask::from_flags(&[TestLayer::Props]);

        assert!(!ground.intersects(&props));
        assert!(ground.intersects(&LayerMask::all()));
        assert!(!ground.intersects(&LayerMask::none()));
    }

    #[test]
    fn remove_clears_a_single_flag() {
        let mut mask = LayerMask::all();
        mask.remove(TestLayer::Props);

        assert!(!mask.has(TestLayer::Props));
        assert!(mask.has(TestLayer::Default));
        assert!(!mask.is_empty());
    }
}
