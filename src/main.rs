use std::collections::BTreeSet;
use std::fmt::Debug;

use balanced_map::collections::binary_tree::AvlTreeMap;

const SEQUENCE: [i32; 34] = [
    4, 1, 2, 3, 6, 1, 5, 3, 7, 6, 7, 7, 7, 7, 7, 7, 8, 8, 8, 8, 8, 0, 0, 0, 0, 0, 0, 0, 10, 10, 10,
    10, 10, 10,
];

/// Reports a mismatch without stopping, so that one run can show every failure.
fn check_equal<T: PartialEq + Debug>(failures: &mut usize, what: &str, actual: T, expected: T) {
    if actual != expected {
        eprintln!("Mismatch in {}: {:?} != {:?}", what, actual, expected);
        *failures += 1;
    }
}

fn main() {
    println!("\n[AvlTreeMap]\n");

    let mut map = AvlTreeMap::new();
    let mut reference = BTreeSet::new();
    let mut failures = 0;

    for key in SEQUENCE {
        reference.insert(key);
        map.insert(key, key.to_string());

        if let Err(error) = map.validate() {
            eprintln!("{}", error);
            failures += 1;
        }
        check_equal(&mut failures, "len after insert", map.len(), reference.len());
        check_equal(&mut failures, "find after insert", map.contains(&key), true);
    }

    println!("{:?}", map);
    println!("{}", map);

    for key in SEQUENCE {
        reference.remove(&key);
        map.remove(&key);

        if let Err(error) = map.validate() {
            eprintln!("{}", error);
            failures += 1;
        }
        check_equal(&mut failures, "len after remove", map.len(), reference.len());
        check_equal(&mut failures, "find after remove", map.contains(&key), false);
    }

    let map: AvlTreeMap<_, _> = [5, 3, 8, 1, 4, 7, 9].into_iter().map(|k| (k, ())).collect();
    println!("{:?}", map);
    check_equal(&mut failures, "bounded height", map.height().is_some_and(|h| h <= 3), true);

    println!("{} failure(s)", failures);
}
