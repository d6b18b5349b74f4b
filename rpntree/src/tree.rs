use std::fmt;
use std::mem;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    // Order in which top-level operators are searched for a split point.
    // The first class with any occurrence wins, leftmost within the class.
    // A '+' anywhere beats a '-' anywhere, '*' beats '/', so `8 / 2 / 4`
    // groups as `8 / (2 / 4)`.
    pub const SPLIT_ORDER: [Op; 5] = [Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Pow];

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
        }
    }

    pub fn from_char(c: char) -> Option<Op> {
        Op::SPLIT_ORDER.iter().copied().find(|op| op.symbol() == c)
    }

    pub fn from_token(token: &str) -> Option<Op> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Op::from_char(c),
            _ => None,
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
            Op::Pow => lhs.powf(rhs),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Binary expression tree. A node is either a literal fragment with no
/// children or an operator owning exactly two subtrees.
///
/// Long operator chains make very deep trees, so comparing, `Display` and
/// dropping walk them with an explicit stack instead of recursing.
#[derive(Debug)]
pub enum Tree {
    Leaf(String),
    Node(Op, Box<Tree>, Box<Tree>),
}

impl Tree {
    pub fn leaf(text: &str) -> Tree {
        Tree::Leaf(text.trim().to_string())
    }

    pub fn node(op: Op, lhs: Tree, rhs: Tree) -> Tree {
        Tree::Node(op, Box::new(lhs), Box::new(rhs))
    }

    // The token this node contributes to the RPN stream
    pub fn value(&self) -> &str {
        match self {
            Tree::Leaf(text) => text,
            Tree::Node(op, _, _) => op.as_str(),
        }
    }

    pub fn left(&self) -> Option<&Tree> {
        match self {
            Tree::Leaf(_) => None,
            Tree::Node(_, lhs, _) => Some(lhs.as_ref()),
        }
    }

    pub fn right(&self) -> Option<&Tree> {
        match self {
            Tree::Leaf(_) => None,
            Tree::Node(_, _, rhs) => Some(rhs.as_ref()),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Tree) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (Tree::Leaf(a), Tree::Leaf(b)) if a == b => (),
                (Tree::Node(op_a, la, ra), Tree::Node(op_b, lb, rb)) if op_a == op_b => {
                    pairs.push((&**ra, &**rb));
                    pairs.push((&**la, &**lb));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        fn detach(tree: &mut Tree, doomed: &mut Vec<Tree>) {
            if let Tree::Node(_, lhs, rhs) = tree {
                doomed.push(mem::replace(&mut **lhs, Tree::Leaf(String::new())));
                doomed.push(mem::replace(&mut **rhs, Tree::Leaf(String::new())));
            }
        }
        let mut doomed = Vec::new();
        detach(self, &mut doomed);
        // children are detached before each node goes, so no drop recurses
        while let Some(mut tree) = doomed.pop() {
            detach(&mut tree, &mut doomed);
        }
    }
}

// Fully parenthesized infix, mostly useful when eyeballing how a split went
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        enum Piece<'a> {
            Tree(&'a Tree),
            Text(&'a str),
        }
        let mut pieces = vec![Piece::Tree(self)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => write!(f, "{}", text)?,
                Piece::Tree(Tree::Leaf(text)) => write!(f, "{}", text)?,
                Piece::Tree(Tree::Node(op, lhs, rhs)) => {
                    write!(f, "(")?;
                    pieces.push(Piece::Text(")"));
                    pieces.push(Piece::Tree(&**rhs));
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Text(op.as_str()));
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Tree(&**lhs));
                }
            }
        }
        Ok(())
    }
}
