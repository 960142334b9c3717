use super::*;

#[test]
fn revert_restores_the_captured_value() {
    let mut value = vec![1, 2, 3];
    let guard = Tentative::capture(&value);

    value.push(4);
    value.remove(0);
    assert_eq!(value, vec![2, 3, 4]);

    value = guard.revert();
    assert_eq!(value, vec![1, 2, 3]);
}

#[test]
fn commit_leaves_the_mutation_in_place() {
    let mut value = String::from("before");
    let guard = Tentative::capture(&value);

    value.push_str(" after");
    guard.commit();

    assert_eq!(value, "before after");
}

#[test]
fn snapshot_is_independent_of_later_mutation() {
    let mut value = vec![String::from("a")];
    let guard = Tentative::capture(&value);
    value[0].push('b');
    assert_eq!(guard.revert(), vec![String::from("a")]);
}
