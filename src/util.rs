/// Utility to output a key or prefix as hex
pub(crate) struct Hex<'a>(&'a [u8], usize);

impl<'a> Hex<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self(data, data.len())
    }

    /// show at most `len` bytes, followed by the total length
    pub fn partial(data: &'a [u8], len: usize) -> Self {
        Self(data, len)
    }
}

impl<'a> std::fmt::Debug for Hex<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.len() > self.1 {
            write!(
                f,
                "[{}..., {} bytes]",
                hex::encode(&self.0[..self.1]),
                self.0.len()
            )
        } else {
            write!(f, "[{}]", hex::encode(self.0))
        }
    }
}

impl<'a> std::fmt::Display for Hex<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// length of the common prefix of two slices
pub(crate) fn common_prefix<T: Eq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(a, b)| a == b).count()
}
