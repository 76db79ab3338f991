//! Fixed-arity composite values.
//!
//! One const-generic type covers every arity. Component accessors check the
//! arity at compile time: `Composite2::y()` builds, `Composite1::y()` does not.

/// An immutable, fixed-size tuple of components.
///
/// Four-component composites are ordered like CSS edges: top, right,
/// bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Composite<T, const N: usize>([T; N]);

pub type Composite1<T> = Composite<T, 1>;
pub type Composite2<T> = Composite<T, 2>;
pub type Composite3<T> = Composite<T, 3>;
pub type Composite4<T> = Composite<T, 4>;

impl<T: Copy, const N: usize> Composite<T, N> {
    pub const ARITY: usize = N;

    #[inline]
    pub const fn new(components: [T; N]) -> Self {
        Self(components)
    }

    /// Every component set to `value`.
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline]
    pub const fn components(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        self.0.get(index).copied()
    }

    #[inline]
    pub fn x(&self) -> T {
        const { assert!(N >= 1, "composite has no x component") };
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        const { assert!(N >= 2, "composite has no y component") };
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        const { assert!(N >= 3, "composite has no z component") };
        self.0[2]
    }

    #[inline]
    pub fn w(&self) -> T {
        const { assert!(N >= 4, "composite has no w component") };
        self.0[3]
    }

    pub fn map<U: Copy>(self, f: impl FnMut(T) -> U) -> Composite<U, N> {
        Composite(self.0.map(f))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        self.0.iter().copied()
    }
}

impl<T: Copy> Composite<T, 2> {
    pub const fn pair(x: T, y: T) -> Self {
        Self([x, y])
    }
}

impl<T: Copy> Composite<T, 4> {
    pub const fn sides(top: T, right: T, bottom: T, left: T) -> Self {
        Self([top, right, bottom, left])
    }

    #[inline] pub fn top(&self) -> T { self.0[0] }
    #[inline] pub fn right(&self) -> T { self.0[1] }
    #[inline] pub fn bottom(&self) -> T { self.0[2] }
    #[inline] pub fn left(&self) -> T { self.0[3] }
}

impl<T: Copy + Default, const N: usize> Default for Composite<T, N> {
    fn default() -> Self {
        Self([T::default(); N])
    }
}

impl<T, const N: usize> From<[T; N]> for Composite<T, N> {
    fn from(components: [T; N]) -> Self {
        Self(components)
    }
}

/// First two components of any composite with at least two.
pub fn xy<T: Copy, const N: usize>(c: &Composite<T, N>) -> (T, T) {
    (c.x(), c.y())
}

/// First three components of any composite with at least three.
pub fn xyz<T: Copy, const N: usize>(c: &Composite<T, N>) -> (T, T, T) {
    (c.x(), c.y(), c.z())
}
