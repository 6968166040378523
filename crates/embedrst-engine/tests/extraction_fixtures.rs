use embedrst_engine::{
    DiagnosticKind, DirectiveAutodetect, SourceRst, TriggerKind, numbered_lines, process_lines,
    snapshot,
};

fn process_fixture(name: &str) -> SourceRst {
    let source = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let result = process_lines(&numbered_lines(&source), &DirectiveAutodetect);
    snapshot::invariants(&result);
    result
}

fn bodies(result: &SourceRst) -> Vec<String> {
    result
        .blocks
        .iter()
        .flat_map(|b| b.fragments.iter().map(|f| f.body()))
        .collect()
}

#[test]
fn all_comment_styles_extract_the_same_admonition_shape() {
    let result = process_fixture("comment_styles.h");
    assert_eq!(result.blocks.len(), 5);
    assert!(result.diagnostics.is_empty());

    let bodies = bodies(&result);
    assert_eq!(bodies.len(), 5);
    for body in &bodies {
        assert!(body.starts_with(".. admonition::"), "body: {body}");
    }

    insta::assert_snapshot!(bodies[0], @r"
    .. admonition:: Javadoc with stars

       Body text under the admonition.
    ");
    insta::assert_snapshot!(bodies[1], @r"
    .. admonition:: Javadoc without stars

       Body text stays, and *emphasis* stays too.
    ");
}

#[test]
fn comment_styles_keep_their_owners() {
    let result = process_fixture("comment_styles.h");
    let owners: Vec<Option<&str>> = result
        .blocks
        .iter()
        .map(|b| b.owner.as_deref())
        .collect();
    assert_eq!(
        owners,
        vec![
            Some("void javadoc_with_stars();"),
            Some("void javadoc_without_stars();"),
            Some("void qt_with_stars();"),
            Some("void triple_slash();"),
            Some("void bang_slash();"),
        ]
    );
}

#[test]
fn every_trigger_kind_yields_the_same_tip() {
    let result = process_fixture("block_triggers.h");
    assert_eq!(result.blocks.len(), 8);
    assert!(result.diagnostics.is_empty());

    let expected = ".. tip::\n\n   If you can see a tip box it worked!";
    let rst_blocks: Vec<(String, TriggerKind)> = result
        .blocks
        .iter()
        .flat_map(|b| b.fragments.iter())
        .map(|f| (f.body(), f.trigger))
        .collect();

    assert_eq!(rst_blocks.len(), 6);
    let triggers: Vec<TriggerKind> = rst_blocks.iter().map(|(_, t)| *t).collect();
    assert_eq!(
        triggers,
        vec![
            TriggerKind::MarkdownFence,
            TriggerKind::SpecialFence,
            TriggerKind::Verbatim,
            TriggerKind::Verbatim,
            TriggerKind::Code,
            TriggerKind::PreTag,
        ]
    );
    for (body, trigger) in &rst_blocks {
        assert_eq!(*body, expected, "trigger: {trigger:?}");
    }
}

#[test]
fn explicitly_literal_blocks_stay_literal() {
    let result = process_fixture("block_triggers.h");
    // `\code{.cpp}` and the plain `<pre>` produce no RST fragments.
    let literal_blocks: Vec<&embedrst_engine::CommentRst> = result
        .blocks
        .iter()
        .filter(|b| b.fragments.is_empty())
        .collect();
    assert_eq!(literal_blocks.len(), 2);
    for block in literal_blocks {
        assert!(block.diagnostics.is_empty());
    }
}

#[test]
fn inline_role_matrix_rewrites_seven_of_nine() {
    let result = process_fixture("inline_roles.h");
    assert_eq!(result.blocks.len(), 1);
    let block = &result.blocks[0];
    assert_eq!(block.fragments.len(), 1);
    let body = block.fragments[0].body();

    let rewritten = body
        .matches(":doc:`Main Documentation <index>`")
        .count();
    assert_eq!(rewritten, 7);

    // The two markdown combinations stay byte-identical.
    assert!(body.contains(r"`:doc:'Main Documentation <index>'`"));
    assert!(body.contains(r"`:doc:\`Main Documentation <index>\``"));

    assert_eq!(block.diagnostics.len(), 2);
    for diagnostic in &block.diagnostics {
        assert_eq!(diagnostic.kind, DiagnosticKind::AmbiguousContainer);
    }
}

#[test]
fn malformed_input_is_reported_and_never_fatal() {
    let result = process_fixture("malformed.h");

    // The unterminated `/**` block is excluded entirely.
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, DiagnosticKind::MalformedBlock);
    assert_eq!(result.diagnostics[0].range.start, 8);

    // The open `\verbatim` fragment is dropped from its block.
    assert_eq!(result.blocks.len(), 1);
    let block = &result.blocks[0];
    assert!(block.fragments.is_empty());
    assert_eq!(block.diagnostics.len(), 1);
    assert_eq!(block.diagnostics[0].kind, DiagnosticKind::MalformedBlock);
}
