use crate::tree::Tree;

/// Anything that can be fed the post-order token stream of a tree.
pub trait TokenSink {
    fn submit(&mut self, token: &str);
}

impl Tree {
    // Left subtree, right subtree, then self. Operands always reach the
    // sink before the operator that consumes them. Chains like
    // `1 + 1 + .. + 1` nest deeper than the call stack, hence the Vec.
    pub fn crawl(&self, sink: &mut impl TokenSink) {
        // (node, children already queued)
        let mut stack = vec![(self, false)];
        while let Some((node, expanded)) = stack.pop() {
            match node {
                Tree::Node(_, lhs, rhs) if !expanded => {
                    stack.push((node, true));
                    stack.push((&**rhs, false));
                    stack.push((&**lhs, false));
                }
                _ => sink.submit(node.value()),
            }
        }
    }
}

/// Collects the stream as space separated RPN text.
#[derive(Default, Debug)]
pub struct RpnPrinter {
    tokens: Vec<String>,
}

impl RpnPrinter {
    pub fn new() -> RpnPrinter {
        RpnPrinter::default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_string(self) -> String {
        self.tokens.join(" ").trim().to_string()
    }
}

impl TokenSink for RpnPrinter {
    fn submit(&mut self, token: &str) {
        self.tokens.push(token.trim().to_string());
    }
}

// Forwards every token to both sinks, in order
struct Tee<'a, A: TokenSink, B: TokenSink + ?Sized>(&'a mut A, &'a mut B);

impl<'a, A: TokenSink, B: TokenSink + ?Sized> TokenSink for Tee<'a, A, B> {
    fn submit(&mut self, token: &str) {
        self.0.submit(token);
        self.1.submit(token);
    }
}

/// Renders `tree` as RPN and, when given a visitor, drives it with the
/// same tokens in the same order.
pub fn traverse(tree: &Tree, visitor: Option<&mut dyn TokenSink>) -> String {
    let mut printer = RpnPrinter::new();
    match visitor {
        None => tree.crawl(&mut printer),
        Some(visitor) => tree.crawl(&mut Tee(&mut printer, visitor)),
    }
    printer.into_string()
}
