//! Pose geometry for device tracking
//!
//! Small hand-rolled f32 types, sized for per-frame gating math rather than
//! general linear algebra. Rotation matrices are row-major throughout, which
//! is also the wire layout for keyframe transforms.

/// 3D position or direction
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    #[inline]
    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[inline]
    pub fn dot(&self, other: &Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another position
    #[inline]
    pub fn distance(&self, other: &Vec3) -> f32 {
        self.sub(other).length()
    }
}

/// Orientation quaternion (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Quat { x, y, z, w }
    }

    /// Rotation of `angle` radians around a unit `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Quat {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    pub fn normalize(&self) -> Quat {
        let len =
            (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len < 1e-6 {
            return Quat::IDENTITY;
        }
        Quat::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    #[inline]
    pub fn conjugate(&self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Smallest rotation angle to another orientation, in radians
    pub fn angle_to(&self, other: &Quat) -> f32 {
        let dot =
            self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w;
        2.0 * dot.abs().clamp(0.0, 1.0).acos()
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        // v' = v + 2w(q x v) + 2(q x (q x v))
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v);
        let t = Vec3::new(t.x * 2.0, t.y * 2.0, t.z * 2.0);
        let c = q.cross(&t);
        Vec3::new(
            v.x + self.w * t.x + c.x,
            v.y + self.w * t.y + c.y,
            v.z + self.w * t.z + c.z,
        )
    }

    /// Row-major 3x3 rotation matrix
    pub fn to_rotation_rows(&self) -> [f32; 9] {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        [
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - w * z),
            2.0 * (x * z + w * y),
            2.0 * (x * y + w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - w * x),
            2.0 * (x * z - w * y),
            2.0 * (y * z + w * x),
            1.0 - 2.0 * (x * x + y * y),
        ]
    }
}

/// Device pose: position + orientation in world space
///
/// For a camera pose, the rotation maps camera-space directions to world
/// space (camera-to-world), so the inverse transform takes world points into
/// the view volume.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Pose { position, rotation }
    }

    /// Transform a world-space point into camera space
    pub fn world_to_camera(&self, point: &Vec3) -> Vec3 {
        self.rotation.conjugate().rotate(&point.sub(&self.position))
    }

    /// Row-major 3x3 rotation block of the camera-to-world transform
    #[inline]
    pub fn rotation_rows(&self) -> [f32; 9] {
        self.rotation.to_rotation_rows()
    }

    /// Row-major 3x4 camera-to-world transform with the translation
    /// expressed relative to `origin` (translation minus origin, per axis)
    pub fn to_rows_relative(&self, origin: &Vec3) -> [f32; 12] {
        let r = self.rotation.to_rotation_rows();
        let t = self.position.sub(origin);
        [
            r[0], r[1], r[2], t.x, //
            r[3], r[4], r[5], t.y, //
            r[6], r[7], r[8], t.z,
        ]
    }
}
