/// Generational handle: `(index, generation)`.
///
/// A handle is only meaningful while its generation matches the issuing
/// container's current generation; bumping the generation invalidates every
/// previously issued handle at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }
}
