//! Face bookkeeping for a four-faced cube.
//!
//! Each physical face keeps its place on the cube; turning only changes which
//! face is at the front. At rest, relative to the front face `f`, the faces hold
//! `f: L`, `f+1: L+1`, `f+2: L+2` and `f+3: L-1` where `L` is the logical index.
//! A quarter-turn therefore repaints exactly one face.

use strum::Display as StrumDisplay;

pub const FACE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Step {
    Forward,
    Backward,
}

impl Step {
    pub fn delta(&self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub fn from_turns(turns: i64) -> Option<Self> {
        match turns.signum() {
            1 => Some(Self::Forward),
            -1 => Some(Self::Backward),
            _ => None,
        }
    }
}

/// What a physical face shows relative to the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Current,
    Next,
    AfterNext,
    Previous,
}

impl Role {
    pub const ALL: [Role; FACE_COUNT] = [
        Self::Current,
        Self::Next,
        Self::AfterNext,
        Self::Previous,
    ];

    /// Face offset from the front face.
    pub fn offset(&self) -> usize {
        match self {
            Self::Current => 0,
            Self::Next => 1,
            Self::AfterNext => 2,
            Self::Previous => 3,
        }
    }

    /// Item offset from the logical index.
    pub fn item_offset(&self) -> i64 {
        match self {
            Self::Current => 0,
            Self::Next => 1,
            Self::AfterNext => 2,
            Self::Previous => -1,
        }
    }
}

/// Wraps a possibly negative index into `0..len`. `len` must be non-zero.
pub fn wrap(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceRing {
    front: usize,
    bindings: [Option<usize>; FACE_COUNT],
}

impl FaceRing {
    /// Front face 0, faces bound around `logical`. Nothing is bound when `len` is 0.
    pub fn seeded(logical: usize, len: usize) -> Self {
        let mut ring = Self::default();
        if len == 0 {
            return ring;
        }
        for role in Role::ALL {
            let item = wrap(logical as i64 + role.item_offset(), len);
            ring.bindings[ring.face_for(role)] = Some(item);
        }
        ring
    }

    pub fn front(&self) -> usize {
        self.front
    }

    pub fn bindings(&self) -> [Option<usize>; FACE_COUNT] {
        self.bindings
    }

    pub fn binding(&self, face: usize) -> Option<usize> {
        self.bindings.get(face).copied().flatten()
    }

    pub fn face_for(&self, role: Role) -> usize {
        (self.front + role.offset()) % FACE_COUNT
    }

    pub fn role_of(&self, face: usize) -> Role {
        let offset = (face + FACE_COUNT - self.front % FACE_COUNT) % FACE_COUNT;
        Role::ALL[offset]
    }

    /// One quarter-turn. `logical` is the index after the turn.
    pub fn turn(&mut self, step: Step, logical: usize, len: usize) {
        let repainted = match step {
            Step::Forward => {
                self.front = (self.front + 1) % FACE_COUNT;
                Role::AfterNext
            }
            Step::Backward => {
                self.front = (self.front + FACE_COUNT - 1) % FACE_COUNT;
                Role::Previous
            }
        };
        if len == 0 {
            return;
        }
        let face = self.face_for(repainted);
        self.bindings[face] = Some(wrap(logical as i64 + repainted.item_offset(), len));
    }
}
