// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// Deepest expression or label nesting a tree may have at all.
///
/// Enforced when nodes are built, so every tree that exists can be
/// dropped, cloned and compared without exhausting the stack.
/// `AstConfig::max_depth` can only tighten this.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Limits and layout used when evaluating or rendering a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstConfig {
    /// Spaces added per nested label level.
    pub indent_width: usize,
    /// Deepest label or expression nesting accepted before
    /// `MaxNestingExceeded` is reported.
    pub max_depth: usize,
}

impl Default for AstConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            max_depth: 256,
        }
    }
}
