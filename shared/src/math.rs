//! Math types for glint
//!
//! Provides a POD 4x4 matrix that can be handed straight to a uniform upload
//! and shared across crates without requiring glam as a dependency of callers.

use std::ops::{Add, Index, IndexMut, Mul, MulAssign, Sub};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 4x4 transform matrix (column-major storage, POD type)
///
/// Element `m[col * 4 + row]` holds row `row` of column `col`, so the
/// translation lives in `m[12]`, `m[13]`, `m[14]`. Matrices act on column
/// vectors: `a * b` applied to `v` equals `a` applied to (`b` applied to `v`).
///
/// Memory layout (64 bytes):
/// - m[0..4]: first column
/// - m[4..8]: second column
/// - m[8..12]: third column
/// - m[12..16]: fourth column (translation)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(transparent)]
pub struct Matrix4x4 {
    pub m: [f32; 16],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix
    pub const ZERO: Self = Self { m: [0.0; 16] };

    /// Create from a flat column-major array
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Flat column-major array for GPU upload
    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.m
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// Raw bytes of the column-major array, as a uniform upload expects them
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Element at `row`, `col`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    /// Set element at `row`, `col`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.m[col * 4 + row] = value;
    }

    /// Column `col` as `[x, y, z, w]`
    pub fn col(&self, col: usize) -> [f32; 4] {
        let c = col * 4;
        [self.m[c], self.m[c + 1], self.m[c + 2], self.m[c + 3]]
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Reset to the identity matrix
    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Matrix product `self * rhs` (apply `rhs` first, then `self`)
    ///
    /// The product is built in a temporary, so `m = m.multiply(&m)` and
    /// `m *= m` are fine.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        let mut tmp = [0.0f32; 16];

        for col in 0..4 {
            let c = col * 4;
            for row in 0..4 {
                tmp[c + row] = a[row] * b[c]
                    + a[4 + row] * b[c + 1]
                    + a[8 + row] * b[c + 2]
                    + a[12 + row] * b[c + 3];
            }
        }

        Self { m: tmp }
    }

    /// Element-wise sum
    pub fn add(&self, rhs: &Self) -> Self {
        Self {
            m: std::array::from_fn(|i| self.m[i] + rhs.m[i]),
        }
    }

    /// Element-wise difference
    pub fn sub(&self, rhs: &Self) -> Self {
        Self {
            m: std::array::from_fn(|i| self.m[i] - rhs.m[i]),
        }
    }

    /// Apply the matrix to a column vector `[x, y, z, w]`
    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let a = &self.m;
        std::array::from_fn(|row| {
            a[row] * v[0] + a[4 + row] * v[1] + a[8 + row] * v[2] + a[12 + row] * v[3]
        })
    }

    /// Rotation about the X axis by `degrees`
    pub fn rotation_x(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut r = Self::IDENTITY;
        r.m[5] = cos;
        r.m[6] = -sin;
        r.m[9] = sin;
        r.m[10] = cos;
        r
    }

    /// Rotation about the Y axis by `degrees`
    pub fn rotation_y(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut r = Self::IDENTITY;
        r.m[0] = cos;
        r.m[2] = -sin;
        r.m[8] = sin;
        r.m[10] = cos;
        r
    }

    /// Rotation about the Z axis by `degrees`
    pub fn rotation_z(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut r = Self::IDENTITY;
        r.m[0] = cos;
        r.m[1] = -sin;
        r.m[4] = sin;
        r.m[5] = cos;
        r
    }

    /// Perspective clip matrix for the view volume bounded by `left`/`right`,
    /// `bottom`/`top` on the near plane and `near`/`far` along -Z.
    ///
    /// Degenerate bounds (`right == left`, `top == bottom`, `far == near`)
    /// produce non-finite elements.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = [0.0f32; 16];

        m[0] = 2.0 * near / (right - left);
        m[5] = 2.0 * near / (top - bottom);

        m[8] = (right + left) / (right - left);
        m[9] = (top + bottom) / (top - bottom);
        m[10] = -(far + near) / (far - near);
        m[11] = -1.0;

        m[14] = -(2.0 * far * near) / (far - near);

        Self { m }
    }

    /// Symmetric perspective projection
    ///
    /// `fovy` is the full vertical field of view in degrees; `aspect` is
    /// width over height.
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_height = (fovy.to_radians() / 2.0).tan();
        let half_width = half_height * aspect;

        Self::frustum(-half_width, half_width, -half_height, half_height, near, far)
    }

    /// Translation to `(x, y, z)` with no rotation or scale
    pub fn position(x: f32, y: f32, z: f32) -> Self {
        let mut r = Self::IDENTITY;
        r.m[12] = x;
        r.m[13] = y;
        r.m[14] = z;
        r
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.m[index]
    }
}

impl IndexMut<usize> for Matrix4x4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.m[index]
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl MulAssign for Matrix4x4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl Add for Matrix4x4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Matrix4x4::add(&self, &rhs)
    }
}

impl Sub for Matrix4x4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Matrix4x4::sub(&self, &rhs)
    }
}

impl From<glam::Mat4> for Matrix4x4 {
    fn from(m: glam::Mat4) -> Self {
        Self {
            m: m.to_cols_array(),
        }
    }
}

impl From<Matrix4x4> for glam::Mat4 {
    fn from(m: Matrix4x4) -> Self {
        glam::Mat4::from_cols_array(&m.m)
    }
}
