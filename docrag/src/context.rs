//! Prompt formatting for retrieved context.

use crate::document::RagContext;

/// Render a retrieved context as text for a model's instruction prompt.
///
/// Returns an empty string when there is no context or it holds no chunks,
/// so callers can append the result unconditionally. Chunk texts appear in
/// ranked order separated by a blank line.
///
/// # Example
///
/// ```rust
/// use docrag::{ContextChunk, RagContext, format_rag_context};
///
/// let context = RagContext {
///     document_id: "doc1".into(),
///     filename: "x.pdf".into(),
///     relevant_chunks: vec![ContextChunk { text: "hello".into(), similarity: 0.9 }],
/// };
/// let prompt = format_rag_context(Some(&context));
/// assert!(prompt.contains("x.pdf") && prompt.contains("hello"));
/// assert_eq!(format_rag_context(None), "");
/// ```
pub fn format_rag_context(context: Option<&RagContext>) -> String {
    let Some(context) = context else {
        return String::new();
    };
    if context.relevant_chunks.is_empty() {
        return String::new();
    }

    let excerpts = context
        .relevant_chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "The user has uploaded a document named \"{filename}\". The following excerpts from it \
         are the most relevant to the user's question. Use them to ground your answer, and say \
         so if they do not contain the information needed.\n\n\
         --- BEGIN EXCERPTS FROM {filename} ---\n\
         {excerpts}\n\
         --- END EXCERPTS ---",
        filename = context.filename,
    )
}
