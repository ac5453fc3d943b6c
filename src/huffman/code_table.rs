use super::tree::{HuffmanNode, HuffmanTree};
use crate::common::ALPHABET_SIZE;

/// Maps every symbol of a tree to its code, the path from the root down to the
/// symbol's leaf. `false` stands for a left edge and `true` for a right edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Index is the symbol. `None` for symbols that are not in the tree
    codes: Vec<Option<Vec<bool>>>,
}

impl CodeTable {
    /// Walk the tree depth first and record the path to every leaf.
    ///
    /// A tree that is just one leaf gives that symbol an empty code.
    pub fn build(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable {
            codes: vec![None; ALPHABET_SIZE],
        };

        let mut stack: Vec<(&HuffmanNode, Vec<bool>)> = vec![(tree.root(), Vec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    table.codes[*symbol as usize] = Some(path);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    if let Some(right) = right.as_deref() {
                        let mut right_path = path.clone();
                        right_path.push(true);
                        stack.push((right, right_path));
                    }
                    if let Some(left) = left.as_deref() {
                        let mut left_path = path;
                        left_path.push(false);
                        stack.push((left, left_path));
                    }
                }
            }
        }

        table
    }

    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        self.codes[symbol as usize].as_deref()
    }

    /// `(symbol, code)` for every symbol in the table, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[bool])> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|code| (symbol as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if no code is the prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&[bool]> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }
}

impl HuffmanTree {
    pub fn code_table(&self) -> CodeTable {
        CodeTable::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::CodeTable;
    use crate::huffman::{FrequencyTable, HuffmanNode, HuffmanTree};
    use rand::{Rng, SeedableRng};

    #[test]
    fn codes_follow_the_tree() {
        // (a, (c, b))
        let tree = HuffmanTree::from_root(HuffmanNode::merge(
            HuffmanNode::leaf(b'a', 4),
            HuffmanNode::merge(HuffmanNode::leaf(b'c', 1), HuffmanNode::leaf(b'b', 3)),
        ));
        let table = tree.code_table();
        assert_eq!(table.code(b'a'), Some(&[false][..]));
        assert_eq!(table.code(b'c'), Some(&[true, false][..]));
        assert_eq!(table.code(b'b'), Some(&[true, true][..]));
        assert_eq!(table.code(b'd'), None);
        assert_eq!(table.len(), 3);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn lone_leaf_has_an_empty_code() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"qqq")).unwrap();
        let table = CodeTable::build(&tree);
        assert_eq!(table.code(b'q'), Some(&[][..]));
        assert_eq!(table.len(), 1);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn detects_prefixes() {
        let mut table = CodeTable {
            codes: vec![None; 256],
        };
        table.codes[0] = Some(vec![false]);
        table.codes[1] = Some(vec![false, true]);
        assert!(!table.is_prefix_free());
        table.codes[0] = Some(vec![true]);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn built_trees_are_prefix_free() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            let alphabet = rng.gen_range(1..=256usize);
            let len = rng.gen_range(1..4096usize);
            let data: Vec<u8> = (0..len)
                .map(|_| {
                    // skewed towards small symbols to get uneven code lengths
                    let x: f64 = rng.gen();
                    ((x * x * x) * alphabet as f64) as u8
                })
                .collect();
            let frequencies = FrequencyTable::from_bytes(&data);
            let tree = HuffmanTree::build(&frequencies).unwrap();
            let table = tree.code_table();
            assert_eq!(table.len(), frequencies.distinct_symbols());
            assert!(table.is_prefix_free());

            // Kraft equality holds for a full binary tree
            if table.len() > 1 {
                let kraft: f64 = table.iter().map(|(_, c)| 0.5f64.powi(c.len() as i32)).sum();
                assert!((kraft - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn frequent_symbols_get_shorter_codes() {
        let frequencies = FrequencyTable::from_bytes(b"eeeeeeeeeeeeeeeetttttttaaaoz");
        let table = HuffmanTree::build(&frequencies).unwrap().code_table();
        let len = |s: u8| table.code(s).unwrap().len();
        assert!(len(b'e') <= len(b't'));
        assert!(len(b't') <= len(b'a'));
        assert!(len(b'a') <= len(b'z'));
    }
}
