//! Serializable views of processing results, plus the structural invariants
//! tests assert on every result.

use serde::Serialize;

use crate::pipeline::SourceRst;

#[derive(Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
    pub diagnostics: Vec<String>,
}

#[derive(Serialize)]
pub struct BlockSnap {
    pub range: (u32, u32),
    pub owner: Option<String>,
    pub fragments: Vec<FragmentSnap>,
    pub diagnostics: Vec<String>,
}

#[derive(Serialize)]
pub struct FragmentSnap {
    pub trigger: String,
    pub range: (u32, u32),
    pub body: String,
}

pub fn normalize(result: &SourceRst) -> Snap {
    let blocks = result
        .blocks
        .iter()
        .map(|block| BlockSnap {
            range: (block.range.start, block.range.end),
            owner: block.owner.clone(),
            fragments: block
                .fragments
                .iter()
                .map(|fragment| FragmentSnap {
                    trigger: format!("{:?}", fragment.trigger),
                    range: (fragment.range.start, fragment.range.end),
                    body: fragment.body(),
                })
                .collect(),
            diagnostics: block.diagnostics.iter().map(|d| d.to_string()).collect(),
        })
        .collect();

    Snap {
        blocks,
        diagnostics: result.diagnostics.iter().map(|d| d.to_string()).collect(),
    }
}

/// Asserts the ordering guarantees every result must uphold: blocks in source
/// order, fragments within a block in source order with monotonically
/// non-decreasing ranges contained in their block's range.
pub fn invariants(result: &SourceRst) {
    let mut previous_block_end = 0u32;
    for block in &result.blocks {
        assert!(
            block.range.start <= block.range.end,
            "inverted block range: {:?}",
            block.range
        );
        assert!(
            block.range.start > previous_block_end,
            "blocks out of source order: {:?} after line {}",
            block.range,
            previous_block_end
        );
        previous_block_end = block.range.end;

        let mut previous_start = 0u32;
        for fragment in &block.fragments {
            assert!(
                fragment.range.start <= fragment.range.end,
                "inverted fragment range: {:?}",
                fragment.range
            );
            assert!(
                fragment.range.start >= previous_start,
                "fragment ranges not monotonic: {:?} after {}",
                fragment.range,
                previous_start
            );
            assert!(
                fragment.range.start >= block.range.start
                    && fragment.range.end <= block.range.end,
                "fragment range not contained in block range: fragment {:?}, block {:?}",
                fragment.range,
                block.range
            );
            previous_start = fragment.range.start;
        }
    }
}
