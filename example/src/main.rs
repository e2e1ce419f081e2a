// example/src/main.rs

use blueprint_example::something::{MainStruct, SomeStruct};

fn main() -> Result<(), String> {
    // Build with the fluent setters; the struct converts into the enum on its own.
    let data = MainStruct::new()
        .with_title("Hi there".to_string())
        .with_something(SomeStruct::new("Big deal".to_string()).with_bar(40));

    let json = serde_json::to_string_pretty(&data.serialize()).map_err(|e| e.to_string())?;
    println!("{}", json);

    // And back again.
    let value: serde_json::Value = serde_json::from_str(&json).map_err(|e| e.to_string())?;
    let data2 = MainStruct::deserialize(&value, "#")?;
    println!("{:?}", data2);

    assert_eq!(data, data2);
    Ok(())
}
