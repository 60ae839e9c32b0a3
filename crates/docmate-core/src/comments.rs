//! Leading-comment lookup and module description banners.

use oxc_ast::ast::Program;
use oxc_span::Span;
use rustc_hash::FxHashMap;

/// Index of block comments keyed by the start offset of the node they are
/// attached to. When several block comments precede the same node the last
/// one wins, matching the "nearest comment" rule.
pub(crate) struct CommentIndex<'a> {
    source: &'a str,
    blocks: FxHashMap<u32, Span>,
}

impl<'a> CommentIndex<'a> {
    pub(crate) fn new(program: &Program<'a>, source: &'a str) -> Self {
        let mut blocks = FxHashMap::default();
        for comment in &program.comments {
            if comment.is_block() {
                blocks.insert(comment.attached_to, comment.content_span());
            }
        }
        Self { source, blocks }
    }

    /// Returns the description for the first attachment point that carries a
    /// block comment. Declarations nested in export statements pass their own
    /// start first, then the export statement's, so documentation written
    /// above `export const x = ...` is not lost.
    pub(crate) fn description_at(&self, attach_points: &[u32]) -> String {
        for point in attach_points {
            if let Some(span) = self.blocks.get(point) {
                return clean_block_comment(slice(self.source, *span));
            }
        }
        String::new()
    }
}

/// Assembles the module-level description from banner line comments.
///
/// Every line comment whose text starts with `!` contributes its remainder,
/// each on its own line, in source order.
pub(crate) fn module_description(program: &Program<'_>, source: &str) -> String {
    let mut description = String::new();
    for comment in &program.comments {
        if !comment.is_line() {
            continue;
        }
        let text = slice(source, comment.content_span());
        if let Some(rest) = text.strip_prefix('!') {
            description.push('\n');
            description.push_str(rest.trim_start());
        }
    }
    description
}

fn clean_block_comment(raw: &str) -> String {
    raw.replace('*', "").trim().to_string()
}

fn slice(source: &str, span: Span) -> &str {
    &source[span.start as usize..span.end as usize]
}
