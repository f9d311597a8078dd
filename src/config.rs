/// What the stack primitives do at the edges of the stack page.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StackPolicy {
    /// Pushing at SP = $00 fails with `StackUnderflow`, popping at
    /// SP = $FF fails with `StackOverflow`.
    #[default]
    Checked,
    /// SP wraps modulo 256 like the real part and never signals.
    Wrapping,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CpuConfig {
    pub stack_policy: StackPolicy,
    /// PC used by `reset` when the reset vector cannot be read.
    pub fallback_entry_point: u16,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig {
            stack_policy: StackPolicy::Checked,
            fallback_entry_point: 0xFFFC,
        }
    }
}
