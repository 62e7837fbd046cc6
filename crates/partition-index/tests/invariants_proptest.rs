use std::collections::BTreeSet;

use partition_index::{
    ArrayTree, AvlTree, AvlTreeMarshaller, Cursor, CursorSource, I32Codec, MultiValueMap,
    OrderedContainer,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Remove(i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..500i32).prop_map(Op::Insert),
        2 => (0..500i32).prop_map(Op::Remove),
    ]
}

fn apply<T: OrderedContainer<i32>>(container: &mut T, model: &mut BTreeSet<i32>, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                let existed = container.insert(k).is_some();
                assert_eq!(existed, !model.insert(k));
            }
            Op::Remove(k) => {
                assert_eq!(container.remove(&k), model.take(&k));
            }
        }
    }
}

fn forward<S: CursorSource>(source: &S) -> Vec<&S::Key> {
    let mut cursor = Cursor::new(source);
    cursor.before_first().unwrap();
    let mut out = Vec::new();
    while cursor.next().unwrap() {
        out.push(cursor.get().unwrap());
    }
    assert!(!cursor.next().unwrap());
    assert!(!cursor.available().unwrap());
    out
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

proptest! {
    #[test]
    fn avl_balance_and_order(ops in prop::collection::vec(op(), 0..300)) {
        init_tracing();
        let mut tree = AvlTree::<i32>::new();
        let mut model = BTreeSet::new();
        apply(&mut tree, &mut model, &ops);
        prop_assert!(tree.assert_valid().is_ok());
        prop_assert_eq!(tree.size(), model.len());
        prop_assert_eq!(tree.keys(), model.iter().collect::<Vec<_>>());
    }

    #[test]
    fn array_tracks_model(ops in prop::collection::vec(op(), 0..300)) {
        let mut array = ArrayTree::<i32>::new();
        let mut model = BTreeSet::new();
        apply(&mut array, &mut model, &ops);
        prop_assert_eq!(array.keys().to_vec(), model.iter().copied().collect::<Vec<_>>());
        prop_assert!(array.keys().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn duplicate_insert_is_idempotent(keys in prop::collection::vec(0..50i32, 1..60)) {
        let mut tree: AvlTree<i32> = keys.iter().copied().collect();
        let size = tree.size();
        for k in &keys {
            prop_assert_eq!(tree.insert(*k), Some(k));
        }
        prop_assert_eq!(tree.size(), size);

        let mut map = MultiValueMap::<i32, i32>::new();
        for k in &keys {
            map.insert(*k, *k);
        }
        let count = map.value_count();
        for k in &keys {
            prop_assert_eq!(map.insert(*k, *k), Some(*k));
        }
        prop_assert_eq!(map.value_count(), count);
    }

    #[test]
    fn cursor_totality(keys in prop::collection::btree_set(any::<i32>(), 0..100)) {
        let tree: AvlTree<i32> = keys.iter().copied().collect();
        let array: ArrayTree<i32> = keys.iter().copied().collect();
        let expected: Vec<&i32> = keys.iter().collect();
        prop_assert_eq!(forward(&tree), expected.clone());
        prop_assert_eq!(forward(&array), expected);
    }

    #[test]
    fn marshal_round_trip(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = AvlTree::<i32>::new();
        apply(&mut tree, &mut BTreeSet::new(), &ops);
        let marshaller = AvlTreeMarshaller::new(I32Codec);
        let restored = marshaller.deserialize(&marshaller.serialize(&tree)).unwrap();
        prop_assert_eq!(restored.keys(), tree.keys());
        prop_assert_eq!(restored.root(), tree.root());
        prop_assert!(restored.assert_valid().is_ok());
    }
}
