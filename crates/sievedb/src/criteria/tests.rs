use super::*;

#[test]
fn field_preserves_insertion_order() {
    let criteria = Criteria::new()
        .field("name", "foo")
        .field("status", 1i64)
        .field("tag", Value::Null);

    let fields: Vec<&str> = criteria.iter().map(|(f, _)| f.as_str()).collect();
    assert_eq!(fields, vec!["name", "status", "tag"]);
}

#[test]
fn field_replaces_existing_criterion() {
    let criteria = Criteria::new().field("name", "foo").field("name", "bar");

    assert_eq!(criteria.len(), 1);
    assert_eq!(criteria[0].1, CriterionValue::from("bar"));
}

#[test]
fn value_null_folds_into_null_variant() {
    assert_eq!(CriterionValue::from(Value::Null), CriterionValue::Null);
}

#[test]
fn value_list_folds_into_list_variant() {
    let value = Value::List(vec![Value::Int(1)]);
    assert_eq!(
        CriterionValue::from(value),
        CriterionValue::List(vec![Value::Int(1)])
    );
}

#[test]
fn operator_parses_known_names() {
    assert_eq!("eq".parse::<Operator>().unwrap(), Operator::Eq);
    assert_eq!("neq".parse::<Operator>().unwrap(), Operator::Ne);
    assert_eq!("like".parse::<Operator>().unwrap(), Operator::Like);
    assert_eq!("is".parse::<Operator>().unwrap(), Operator::Is);
}

#[test]
fn operator_rejects_unknown_names() {
    let err = "regexp".parse::<Operator>().unwrap_err();
    assert_eq!(err, OperatorNotSupported("regexp".to_string()));
}

#[test]
fn like_position_parse_is_lenient() {
    assert_eq!(LikePosition::parse("Prefix"), Some(LikePosition::Prefix));
    assert_eq!(LikePosition::parse("anywhere"), None);
    assert_eq!(LikePosition::parse(""), None);
}

#[test]
fn descriptor_builder() {
    let descriptor = Descriptor::like("foo").pos(LikePosition::Suffix);
    assert_eq!(descriptor.operator, Operator::Like);
    assert_eq!(descriptor.value, Value::Text("foo".to_string()));
    assert_eq!(descriptor.pos, Some(LikePosition::Suffix));
}
