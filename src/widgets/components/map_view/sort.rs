use crate::core::map_key::MapKey;
use crate::core::value::Value;

/// Row order for a grid: ascending by the text of the key, or of the value
/// when `by_value` is set. The sort is stable, so equal texts keep the
/// collection's insertion order.
pub fn order<'a, I>(entries: I, by_value: bool) -> Vec<MapKey>
where
    I: IntoIterator<Item = (&'a MapKey, &'a Value)>,
{
    let mut keyed: Vec<(String, &MapKey)> = entries
        .into_iter()
        .map(|(key, value)| {
            let text = if by_value {
                value.to_string()
            } else {
                key.to_string()
            };
            (text, key)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, key)| key.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::order;
    use crate::core::map_key::MapKey;
    use crate::core::value::Value;

    fn entries() -> Vec<(MapKey, Value)> {
        vec![
            (MapKey::from("b"), Value::Int(1)),
            (MapKey::from("a"), Value::Int(2)),
            (MapKey::from("c"), Value::Int(0)),
        ]
    }

    fn texts(keys: Vec<MapKey>) -> Vec<String> {
        keys.into_iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn orders_by_key_text() {
        let entries = entries();
        let keys = order(entries.iter().map(|(k, v)| (k, v)), false);
        assert_eq!(texts(keys), ["a", "b", "c"]);
    }

    #[test]
    fn orders_by_value_text() {
        let entries = entries();
        let keys = order(entries.iter().map(|(k, v)| (k, v)), true);
        assert_eq!(texts(keys), ["c", "b", "a"]);
    }

    #[test]
    fn compares_text_not_numbers() {
        let entries = vec![
            (MapKey::from(10i64), Value::None),
            (MapKey::from(9i64), Value::None),
        ];
        let keys = order(entries.iter().map(|(k, v)| (k, v)), false);
        assert_eq!(texts(keys), ["10", "9"]);
    }

    #[test]
    fn tiny_floats_sort_by_exponent_text() {
        let entries = vec![
            (MapKey::from("small"), Value::Float(5e-7)),
            (MapKey::from("tenth"), Value::Float(0.1)),
        ];
        let keys = order(entries.iter().map(|(k, v)| (k, v)), true);
        assert_eq!(texts(keys), ["tenth", "small"]);
    }

    #[test]
    fn equal_texts_keep_insertion_order() {
        let entries = vec![
            (MapKey::from("z"), Value::from("same")),
            (MapKey::from("y"), Value::from("same")),
            (MapKey::from("x"), Value::from("other")),
        ];
        let keys = order(entries.iter().map(|(k, v)| (k, v)), true);
        assert_eq!(texts(keys), ["x", "z", "y"]);
    }
}
