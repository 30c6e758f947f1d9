/// Embedding input for a passage: `prefix` followed by the chunk text.
///
/// The prefix is a retrieval-model convention (e.g. E5's `"passage: "`) and is
/// never written into a chunk's display `text`.
pub fn passage_text(prefix: &str, text: &str) -> String {
    let mut out = String::with_capacity(prefix.len() + text.len());
    out.push_str(prefix);
    out.push_str(text);
    out
}
