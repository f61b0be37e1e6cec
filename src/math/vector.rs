use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Range, Sub};
use std::slice::{Iter, IterMut};

use num_traits::Zero;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::config::VectorLimits;
use crate::error::VectorError;

/// Largest size a `Vector` can be constructed with.
pub const MAX_VECTOR_SIZE: usize = 100_000_000;

/// Fixed-size vector whose elements live at raw indices
/// `[start_index, start_index + size)`.
///
/// The buffer is owned exclusively; `clone` always deep-copies. Equality
/// compares size and contents only, the start index is metadata.
#[derive(Debug, Serialize)]
pub struct Vector<T> {
    data: Vec<T>,
    start_index: usize,
}

/// Unvalidated wire form; converted through `Vector::from_vec`.
#[derive(Deserialize)]
struct RawVector<T> {
    data: Vec<T>,
    #[serde(default)]
    start_index: isize,
}

impl<'de, T> Deserialize<'de> for Vector<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawVector::deserialize(deserializer)?;
        Vector::from_vec(raw.data, raw.start_index).map_err(de::Error::custom)
    }
}

fn validate(size: isize, start_index: isize, max: usize) -> Result<(usize, usize), VectorError> {
    let size = match usize::try_from(size) {
        Ok(s) if s <= max => s,
        _ => {
            log::debug!("Rejecting vector size {} (max {})", size, max);
            return Err(VectorError::InvalidSize { size, max });
        }
    };
    let start = usize::try_from(start_index).map_err(|_| {
        log::debug!("Rejecting negative start index {}", start_index);
        VectorError::InvalidStartIndex(start_index)
    })?;
    Ok((size, start))
}

impl<T> Vector<T>
where
    T: Clone + Default,
{
    /// Vector of `size` default elements starting at index 0.
    pub fn new(size: isize) -> Result<Self, VectorError> {
        Self::with_start_index(size, 0)
    }

    pub fn with_start_index(size: isize, start_index: isize) -> Result<Self, VectorError> {
        Self::with_limits(size, start_index, &VectorLimits::default())
    }

    /// Like `with_start_index`, but sizes are checked against `limits`.
    pub fn with_limits(
        size: isize,
        start_index: isize,
        limits: &VectorLimits,
    ) -> Result<Self, VectorError> {
        let (size, start_index) = validate(size, start_index, limits.effective_max())?;
        Ok(Self {
            data: vec![T::default(); size],
            start_index,
        })
    }
}

impl<T> Vector<T> {
    /// Wraps `data` with the given start index, applying the constructor checks.
    pub fn from_vec(data: Vec<T>, start_index: isize) -> Result<Self, VectorError> {
        let size = isize::try_from(data.len()).unwrap_or(isize::MAX);
        let (_, start_index) = validate(size, start_index, MAX_VECTOR_SIZE)?;
        Ok(Self { data, start_index })
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Valid raw indices for `get`, `get_mut` and `[]`.
    pub fn indices(&self) -> Range<usize> {
        self.start_index..self.start_index + self.data.len()
    }

    #[inline]
    fn offset(&self, index: usize) -> Result<usize, VectorError> {
        index
            .checked_sub(self.start_index)
            .filter(|&pos| pos < self.data.len())
            .ok_or(VectorError::IndexOutOfRange {
                index,
                start_index: self.start_index,
                size: self.data.len(),
            })
    }

    pub fn get(&self, index: usize) -> Result<&T, VectorError> {
        let pos = self.offset(index)?;
        Ok(&self.data[pos])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let pos = self.offset(index)?;
        Ok(&mut self.data[pos])
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Iterates in storage order, i.e. raw index `start_index + k`.
    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Vector<U>
    where
        F: FnMut(&T) -> U,
    {
        Vector {
            data: self.data.iter().map(|v| f(v)).collect(),
            start_index: self.start_index,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    fn zip_with<F>(&self, rhs: &Vector<T>, mut f: F) -> Result<Vector<T>, VectorError>
    where
        T: Clone,
        F: FnMut(T, T) -> T,
    {
        self.check_same_size(rhs)?;
        Ok(Vector {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(a, b)| f(a.clone(), b.clone()))
                .collect(),
            start_index: self.start_index,
        })
    }

    fn check_same_size(&self, rhs: &Vector<T>) -> Result<(), VectorError> {
        if self.size() != rhs.size() {
            log::debug!(
                "Size mismatch in vector arithmetic: {} vs {}",
                self.size(),
                rhs.size()
            );
            return Err(VectorError::SizeMismatch {
                left: self.size(),
                right: rhs.size(),
            });
        }
        Ok(())
    }

    /// Element-wise sum. The result keeps `self`'s start index.
    pub fn try_add(&self, rhs: &Vector<T>) -> Result<Vector<T>, VectorError>
    where
        T: Clone + Add<Output = T>,
    {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn try_sub(&self, rhs: &Vector<T>) -> Result<Vector<T>, VectorError>
    where
        T: Clone + Sub<Output = T>,
    {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Inner product; zero for two empty vectors.
    pub fn dot(&self, rhs: &Vector<T>) -> Result<T, VectorError>
    where
        T: Clone + Zero + Mul<Output = T>,
    {
        self.check_same_size(rhs)?;
        Ok(self
            .data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            start_index: self.start_index,
        }
    }

    // Reuses the existing allocation when capacity allows.
    fn clone_from(&mut self, source: &Self) {
        self.data.clone_from(&source.data);
        self.start_index = source.start_index;
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T> From<Vector<T>> for Vec<T> {
    fn from(value: Vector<T>) -> Self {
        value.data
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

/// Element types that may appear as the scalar operand of `vector + k`,
/// `vector - k` and `vector * k`.
pub trait Scalar: Copy {}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(impl Scalar for $t {})*
    };
}

impl_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<'a, T> $trait<T> for &'a Vector<T>
        where
            T: Scalar + $trait<Output = T>,
        {
            type Output = Vector<T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.mapv(|&v| v $op rhs)
            }
        }

        impl<T> $trait<T> for Vector<T>
        where
            T: Scalar + $trait<Output = T>,
        {
            type Output = Vector<T>;

            fn $method(mut self, rhs: T) -> Self::Output {
                for v in self.data.iter_mut() {
                    *v = *v $op rhs;
                }
                self
            }
        }
    };
}

impl_scalar_op!(Add, add, +);
impl_scalar_op!(Sub, sub, -);
impl_scalar_op!(Mul, mul, *);

impl<'a, 'b, T> Add<&'b Vector<T>> for &'a Vector<T>
where
    T: Clone + Add<Output = T>,
{
    type Output = Result<Vector<T>, VectorError>;

    fn add(self, rhs: &'b Vector<T>) -> Self::Output {
        self.try_add(rhs)
    }
}

impl<'a, 'b, T> Sub<&'b Vector<T>> for &'a Vector<T>
where
    T: Clone + Sub<Output = T>,
{
    type Output = Result<Vector<T>, VectorError>;

    fn sub(self, rhs: &'b Vector<T>) -> Self::Output {
        self.try_sub(rhs)
    }
}

/// Dot product.
impl<'a, 'b, T> Mul<&'b Vector<T>> for &'a Vector<T>
where
    T: Clone + Zero + Mul<Output = T>,
{
    type Output = Result<T, VectorError>;

    fn mul(self, rhs: &'b Vector<T>) -> Self::Output {
        self.dot(rhs)
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
