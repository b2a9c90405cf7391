use hci_wrap::{is_none, invalid_part, InvalidSourceError, IntoPlain, Slice, Wrapped};
use serde_json::{json, Value};

const DESC: &str = "Desc";

fn access_path<'a>(wrapped: &Wrapped<'a>, path: &[Value]) -> Result<Wrapped<'a>, InvalidSourceError> {
    path.iter()
        .try_fold(wrapped.clone(), |current, key| current.at(key))
}

fn assert_invalid_src(
    result: Result<impl std::fmt::Debug, InvalidSourceError>,
    data: &Value,
    location: &str,
    reason: &str,
) {
    let error = result.unwrap_err();
    assert_eq!(
        error,
        InvalidSourceError {
            description: DESC.to_string(),
            data: data.clone(),
            location: location.to_string(),
            reason: reason.to_string(),
        }
    );
}

fn scalars() -> Vec<(Value, &'static str)> {
    vec![
        (json!(1), "int"),
        (json!(1.1), "float"),
        (json!(true), "bool"),
        (Value::Null, "NoneType"),
    ]
}

#[test]
fn test_dict_successful_access() {
    let data = json!({
        "a": {"b": "c"},
        "d": ["e", "f"],
        "g": "abc",
        "h": 1,
        "i": 1.2,
        "j": true,
        "k": null,
    });
    let wrapped = Wrapped::new(&data, DESC);

    for (path, expected) in [
        (vec![json!("a"), json!("b")], json!("c")),
        (vec![json!("d"), json!(1)], json!("f")),
        (vec![json!("g")], json!("abc")),
        (vec![json!("h")], json!(1)),
        (vec![json!("i")], json!(1.2)),
        (vec![json!("j")], json!(true)),
        (vec![json!("k")], Value::Null),
    ] {
        let reached = access_path(&wrapped, &path).unwrap();
        assert_eq!(reached.into_plain(), expected);
    }
}

#[test]
fn test_unwrap_is_transparent() {
    let data = json!({
        "primitives": [{"id": "d1", "operations": [{"name": "monitor", "interval": "10s"}]}],
        "empty": {},
        "mixed": [1, 2.5, "x", null, true, [], {"k": [1]}],
    });
    let wrapped = Wrapped::new(&data, DESC);

    assert_eq!(wrapped.clone().into_plain(), data);
    let all_values: Vec<Value> = wrapped.values().unwrap().map(IntoPlain::into_plain).collect();
    assert_eq!(all_values, data.as_object().unwrap().values().cloned().collect::<Vec<_>>());
}

#[test]
fn test_path_accumulates() {
    let data = json!({"primitives": [{"operations": [{"name": "monitor"}]}]});
    let wrapped = Wrapped::new(&data, DESC);
    let operation = access_path(
        &wrapped,
        &[json!("primitives"), json!(0), json!("operations"), json!(0)],
    )
    .unwrap();

    assert_eq!(operation.location(), "/primitives/0/operations/0");
}

#[test]
fn test_sibling_paths_are_isolated() {
    let data = json!({"a": {"x": 1}, "b": {"y": 2}});
    let wrapped = Wrapped::new(&data, DESC);
    let a = wrapped.at("a").unwrap();
    let b = wrapped.at("b").unwrap();
    let ax = a.at("x").unwrap();

    assert_eq!(a.location(), "/a");
    assert_eq!(b.location(), "/b");
    assert_eq!(ax.location(), "/a/x");
    assert_eq!(b.at("y").unwrap().location(), "/b/y");
}

#[test]
fn test_missing_key_at_root() {
    let data = json!({"cluster_name": "abc"});
    let wrapped = Wrapped::new(&data, "corosync configuration");
    let error = wrapped.at("transport").unwrap_err();

    assert_eq!(error.description, "corosync configuration");
    assert_eq!(error.location, "");
    assert_eq!(error.reason, "Missing key 'transport'");
}

#[test]
fn test_missing_key_deep_keeps_whole_data() {
    let data = json!({"nodes": [{"name": "n1"}]});
    let wrapped = Wrapped::new(&data, DESC);

    assert_invalid_src(
        access_path(&wrapped, &[json!("nodes"), json!(0), json!("addrs")]),
        &data,
        "/nodes/0",
        "Missing key 'addrs'",
    );
}

#[test]
fn test_dict_index_access() {
    let data = json!({"a": 1});
    assert_invalid_src(
        Wrapped::new(&data, DESC).at(0),
        &data,
        "",
        "Expected list with index '0' but got 'dict'",
    );
}

#[test]
fn test_dict_not_sliceable() {
    let data = json!({"a": 1});
    assert_invalid_src(
        Wrapped::new(&data, DESC).slice(Slice::to(-1)),
        &data,
        "",
        "Invalid access by '..-1' to 'dict'",
    );
}

#[test]
fn test_dict_iteration_yields_keys() {
    // a dict where a list of dicts was expected
    let data = json!({"outer": {"some_key": 1}});
    let outer = Wrapped::new(&data, DESC).at("outer").unwrap();
    let result = outer
        .iter()
        .unwrap()
        .try_for_each(|item| item.at("x").map(drop));

    assert_invalid_src(result, &data, "/outer", "Expected dict with key 'x' but got 'str'");
}

#[test]
fn test_dict_keys_values_items() {
    let data = json!({"a": 1, "b": 2});
    let wrapped = Wrapped::new(&data, DESC);

    let keys: Vec<Value> = wrapped.keys().unwrap().map(IntoPlain::into_plain).collect();
    assert_eq!(keys, vec![json!("a"), json!("b")]);

    let values: Vec<Value> = wrapped.values().unwrap().map(IntoPlain::into_plain).collect();
    assert_eq!(values, vec![json!(1), json!(2)]);

    let items: Vec<(Value, Value)> = wrapped.items().unwrap().into_plain();
    assert_eq!(items, vec![(json!("a"), json!(1)), (json!("b"), json!(2))]);
}

#[test]
fn test_dict_accepts_wrapped_keys() {
    let data = json!({"a": 1});
    let key_source = json!("a");
    let key = Wrapped::new(&key_source, DESC);

    assert_eq!(Wrapped::new(&data, DESC).at(&key).unwrap(), 1_i64);
}

#[test]
fn test_dict_get_returns_default_unwrapped() {
    let data = json!({"a": 1});
    let wrapped = Wrapped::new(&data, DESC);

    let present = wrapped.get_or("a", json!([])).unwrap();
    assert_eq!(present.as_wrapped().unwrap().location(), "/a");

    let absent = wrapped.get_or("b", json!([])).unwrap();
    assert!(absent.as_wrapped().is_none());
    assert_eq!(absent.into_plain(), json!([]));
}

#[test]
fn test_list_key_access() {
    let data = json!([1]);
    assert_invalid_src(
        Wrapped::new(&data, DESC).at("a"),
        &data,
        "",
        "Expected dict with key 'a' but got 'list'",
    );
}

#[test]
fn test_list_index_out_of_range() {
    let data = json!([1]);
    assert_invalid_src(Wrapped::new(&data, DESC).at(1), &data, "", "Index '1' out of range");
}

#[test]
fn test_list_iterate() {
    let data = json!([1, 3, 5]);
    let items: Vec<Value> = Wrapped::new(&data, DESC)
        .iter()
        .unwrap()
        .map(IntoPlain::into_plain)
        .collect();

    assert_eq!(Value::Array(items), data);
}

#[test]
fn test_list_slice_and_concat() {
    let data = json!(["a", "b", "c"]);
    let extra = json!(["d"]);
    let wrapped = Wrapped::new(&data, DESC);

    assert_eq!(wrapped.slice(Slice::to(-1)).unwrap(), json!(["a", "b"]));
    assert_eq!(wrapped.concat(&extra).unwrap(), json!(["a", "b", "c", "d"]));
}

#[test]
fn test_list_accepts_wrapped_indexes() {
    let data = json!(["a", "b"]);
    let index_source = json!(1);
    let index = Wrapped::new(&index_source, DESC);

    assert_eq!(Wrapped::new(&data, DESC).at(index).unwrap(), "b");
}

#[test]
fn test_scalar_key_access() {
    for (data, kind) in scalars() {
        let wrapped = Wrapped::new(&data, DESC);
        let reason = format!("Expected dict with key 'a' but got '{kind}'");

        assert_invalid_src(wrapped.at("a"), &data, "", &reason);
        assert_invalid_src(wrapped.contains("a"), &data, "", &reason);
    }
}

#[test]
fn test_scalar_not_iterable() {
    for (data, kind) in scalars() {
        assert_invalid_src(
            Wrapped::new(&data, DESC).iter(),
            &data,
            "",
            &format!("Expected iterable but got '{kind}'"),
        );
    }
}

#[test]
fn test_keys_values_items_need_dict() {
    let mut cases = scalars();
    cases.push((json!("abc"), "str"));
    cases.push((json!([1, 2]), "list"));

    for (data, kind) in cases {
        let wrapped = Wrapped::new(&data, DESC);
        let reason = format!("Expected dict but got '{kind}'");

        assert_invalid_src(wrapped.keys(), &data, "", &reason);
        assert_invalid_src(wrapped.values(), &data, "", &reason);
        assert_invalid_src(wrapped.items(), &data, "", &reason);
    }
}

#[test]
fn test_string_key_access() {
    let data = json!({"a": "abc"});
    assert_invalid_src(
        Wrapped::new(&data, DESC).at("a").and_then(|a| a.at("a")),
        &data,
        "/a",
        "Expected dict with key 'a' but got 'str'",
    );
}

#[test]
fn test_string_instead_of_list_of_objects() {
    let data = json!({"obj": "abc"});
    let obj = Wrapped::new(&data, DESC).at("obj").unwrap();

    let direct = obj.iter().unwrap().try_for_each(|item| item.at("x").map(drop));
    assert_invalid_src(direct, &data, "/obj/0", "Expected dict with key 'x' but got 'str'");

    let sliced = obj
        .slice(Slice::full())
        .unwrap()
        .iter()
        .unwrap()
        .try_for_each(|item| item.at("x").map(drop));
    assert_invalid_src(sliced, &data, "/obj/0", "Expected dict with key 'x' but got 'str'");
}

#[test]
fn test_string_slice_and_concat() {
    let data = json!("abc");
    let wrapped = Wrapped::new(&data, DESC);

    assert_eq!(wrapped.slice(Slice::to(-1)).unwrap(), "ab");
    assert_eq!(wrapped.concat(&json!("d")).unwrap(), "abcd");
    assert_invalid_src(
        wrapped.concat(&json!(1)),
        &data,
        "",
        "Unsupported operand type(s) for '+': 'str' and 'int'",
    );
}

#[test]
fn test_none_sorting() {
    let data = json!({"a": [1, 2, null]});
    let list = Wrapped::new(&data, DESC).at("a").unwrap();

    assert_invalid_src(
        list.sorted(),
        &data,
        "/a/2",
        "Comparison not supported between 'NoneType' and 'int'",
    );
}

#[test]
fn test_sorting_keeps_paths() {
    let data = json!(["b", "c", "a"]);
    let sorted = Wrapped::new(&data, DESC).sorted().unwrap();
    let located: Vec<(String, String)> = sorted
        .iter()
        .map(|item| (item.to_string(), item.location()))
        .collect();

    assert_eq!(
        located,
        vec![
            ("a".to_string(), "/2".to_string()),
            ("b".to_string(), "/0".to_string()),
            ("c".to_string(), "/1".to_string()),
        ]
    );
}

#[test]
fn test_none_compare() {
    let data = json!({"a": null, "b": "some"});
    let wrapped = Wrapped::new(&data, DESC);

    assert!(is_none(Value::Null));
    assert!(is_none(wrapped.at("a").unwrap()));
    assert!(!is_none("some"));
    assert!(!is_none(wrapped.at("b").unwrap()));
    assert_eq!(wrapped.at("a").unwrap(), Value::Null);
    assert_eq!(wrapped.at("a").unwrap(), wrapped.at("a").unwrap());
}

#[test]
fn test_bool_operand_error() {
    let data = json!({"a": true});
    assert_invalid_src(
        Wrapped::new(&data, DESC).at("a").and_then(|a| a.xor(&json!("a"))),
        &data,
        "/a",
        "Unsupported operand type(s) for 'xor': 'bool' and 'str'",
    );
}

#[test]
fn test_bool_is_not_an_integer() {
    let data = json!([true, 1]);
    let wrapped = Wrapped::new(&data, DESC);

    assert_ne!(wrapped.at(0).unwrap(), 1_i64);
    assert_eq!(wrapped.at(0).unwrap(), true);
    assert_eq!(wrapped.at(1).unwrap(), 1_i64);
}

#[test]
fn test_invert_needs_bool_or_int() {
    let data = json!({"a": "text"});
    assert_invalid_src(
        Wrapped::new(&data, DESC).at("a").and_then(|a| a.invert()),
        &data,
        "/a",
        "Bad operand type for unary '~': 'str'",
    );
}

#[test]
fn test_len() {
    let data = json!({"s": "abc", "l": [1, 2], "n": 1});
    let wrapped = Wrapped::new(&data, DESC);

    assert_eq!(wrapped.len().unwrap(), 3);
    assert_eq!(wrapped.at("s").unwrap().len().unwrap(), 3);
    assert_eq!(wrapped.at("l").unwrap().len().unwrap(), 2);
    assert_invalid_src(
        wrapped.at("n").and_then(|n| n.len()),
        &data,
        "/n",
        "Object of type 'int' has no len()",
    );
}

#[test]
fn test_invalid_part_reports_own_location() {
    let data = json!({"a": {"b": "invalid"}});
    let part = Wrapped::new(&data, DESC).at("a").unwrap().at("b").unwrap();
    let error = invalid_part(&part, "Ad hoc err");

    assert_eq!(
        error.as_invalid_source(),
        Some(&InvalidSourceError {
            description: DESC.to_string(),
            data: data.clone(),
            location: "/a/b".to_string(),
            reason: "Ad hoc err".to_string(),
        })
    );
}

#[test]
fn test_error_serializes_all_fields() {
    let data = json!({"nodes": []});
    let error = Wrapped::new(&data, DESC).at(0).unwrap_err();
    let serialized = serde_json::to_value(&error).unwrap();

    assert_eq!(
        serialized,
        json!({
            "description": DESC,
            "data": {"nodes": []},
            "location": "",
            "reason": "Expected list with index '0' but got 'dict'",
        })
    );
}

#[test]
fn test_list_comparison_continues_past_equal_numbers() {
    let data = json!([[1, 5], [1.0, 3], [true, 3]]);
    let wrapped = Wrapped::new(&data, "desc");
    let first = wrapped.at(0).unwrap();
    let second = wrapped.at(1).unwrap();
    let third = wrapped.at(2).unwrap();

    assert_eq!(first.try_cmp(&second).unwrap(), std::cmp::Ordering::Greater);
    assert_eq!(second.try_cmp(&third).unwrap(), std::cmp::Ordering::Equal);

    let sorted: Vec<Value> = wrapped.sorted().unwrap().into_plain();
    assert_eq!(sorted, vec![json!([1.0, 3]), json!([true, 3]), json!([1, 5])]);
}
