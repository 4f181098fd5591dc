use blockwork_document::{LayoutDocument, ThemeDocument};
use blockwork_render::{PlaceholderKind, Registry, RenderNode, RenderTree, Renderer};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Emit placeholder markup for degraded entries. The public site
    /// usually wants them (an author fixing a page needs to see where the
    /// broken block sits), but hosts may opt out.
    pub emit_placeholders: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            emit_placeholders: true,
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn open_line(&mut self) {
        if self.options.pretty {
            let indent = self.options.indent.repeat(self.depth);
            self.buffer.push_str(&indent);
        }
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.buffer.push('\n');
        }
    }
}

/// Render and serialize a whole document in one step.
pub fn compile_document(
    registry: &Registry,
    doc: &LayoutDocument,
    theme: &ThemeDocument,
    options: CompileOptions,
) -> String {
    let tree = Renderer::new(registry).render_document(doc, theme);
    compile_tree(&tree, options)
}

/// Serialize an already-rendered tree.
pub fn compile_tree(tree: &RenderTree, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    for node in &tree.nodes {
        compile_node(node, &mut ctx);
    }
    ctx.buffer
}

// Elements with no closing tag.
fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

fn compile_node(node: &RenderNode, ctx: &mut Context) {
    match node {
        RenderNode::Element {
            tag,
            attributes,
            styles,
            children,
            entry_id,
        } => {
            ctx.open_line();
            ctx.add(&format!("<{tag}"));
            for (key, value) in attributes {
                ctx.add(&format!(" {key}=\"{}\"", escape_attr(value)));
            }
            if let Some(id) = entry_id {
                ctx.add(&format!(" data-entry=\"{}\"", escape_attr(id)));
            }
            if !styles.is_empty() {
                let css: Vec<String> = styles
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect();
                ctx.add(&format!(" style=\"{}\"", escape_attr(&css.join("; "))));
            }

            if is_void(tag) {
                ctx.add(" />");
                ctx.end_line();
                return;
            }

            ctx.add(">");
            if children.is_empty() {
                ctx.add(&format!("</{tag}>"));
                ctx.end_line();
                return;
            }

            ctx.end_line();
            ctx.depth += 1;
            for child in children {
                compile_node(child, ctx);
            }
            ctx.depth -= 1;
            ctx.open_line();
            ctx.add(&format!("</{tag}>"));
            ctx.end_line();
        }

        RenderNode::Text { content } => {
            ctx.open_line();
            ctx.add(&escape_text(content));
            ctx.end_line();
        }

        RenderNode::Placeholder { kind, entry_id } => {
            if !ctx.options.emit_placeholders {
                return;
            }
            let class = match kind {
                PlaceholderKind::UnknownType { .. } => "bw-placeholder bw-placeholder--unknown",
                PlaceholderKind::InvalidSettings { .. } => "bw-placeholder bw-placeholder--invalid",
            };
            ctx.open_line();
            ctx.add(&format!(
                "<div class=\"{class}\" data-entry=\"{}\">{}</div>",
                escape_attr(entry_id),
                escape_text(&kind.message())
            ));
            ctx.end_line();
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
