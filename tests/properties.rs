use proptest::prelude::*;
use twigbars::{BlockKind, Node, TranspileOptions, Transpiler};

const END_FOR: &str = "{% endfor %}";
const END_IF: &str = "{% endif %}";

// -- Strategy helpers --

fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..4).prop_map(|segments| segments.join("."))
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        any::<String>().prop_map(Node::text),
        arb_path().prop_map(Node::variable),
        Just(Node::variable("this")),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop_oneof![
                Just(BlockKind::If),
                Just(BlockKind::Unless),
                Just(BlockKind::Each)
            ],
            prop::option::of(arb_path()),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(kind, args, children)| Node::Block {
                kind,
                args,
                children,
            })
    })
}

fn count_blocks(nodes: &[Node]) -> (usize, usize) {
    nodes.iter().fold((0, 0), |(fors, ifs), node| match node {
        Node::Block {
            kind,
            args,
            children,
        } => {
            let (f, i) = count_blocks(children);
            match kind {
                BlockKind::Each if args.is_some() => (fors + f + 1, ifs + i),
                BlockKind::Each => (fors, ifs),
                _ => (fors + f, ifs + i + 1),
            }
        }
        _ => (fors, ifs),
    })
}

proptest! {
    #[test]
    fn text_renders_verbatim(value in any::<String>()) {
        let out = Transpiler::default().render(&[Node::text(value.clone())]).unwrap();
        prop_assert_eq!(out, value);
    }

    #[test]
    fn variable_outside_loop_is_wrapped_unchanged(name in arb_path()) {
        let out = Transpiler::default().render(&[Node::variable(name.clone())]).unwrap();
        prop_assert_eq!(out, format!("{{{{{}}}}}", name));
    }

    #[test]
    fn block_tags_are_balanced(tree in prop::collection::vec(arb_node(), 0..4)) {
        let options = TranspileOptions { max_depth: 16, ..TranspileOptions::default() };
        let out = Transpiler::new(options).render(&tree).unwrap();
        // text nodes may contain anything, so count against the tree itself
        let (fors, ifs) = count_blocks(&tree);
        prop_assert!(out.matches(END_FOR).count() >= fors, "missing endfor in {:?}", out);
        prop_assert!(out.matches(END_IF).count() >= ifs, "missing endif in {:?}", out);
    }

    #[test]
    fn rendering_is_deterministic(tree in prop::collection::vec(arb_node(), 0..4)) {
        let transpiler = Transpiler::default();
        prop_assert_eq!(transpiler.render(&tree).unwrap(), transpiler.render(&tree).unwrap());
    }
}
