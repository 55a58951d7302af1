use std::sync::{Arc, RwLock};

use nodecode::{Config, ConverterBuilder, DecisionGraph, PanelStore, RequestConfig};

fn main() {
    let config_str = include_str!("./config.toml");

    let config = Config::load_from_str(config_str).unwrap();

    let converter = ConverterBuilder::new().config(config).build().unwrap();

    let text = include_str!("./graph.json");

    let graph = Arc::new(RwLock::new(DecisionGraph::from_json(text).unwrap()));

    // edit the API request through its panel store, changes land in the graph
    let node = graph.read().unwrap().node("api-1").cloned().unwrap();
    let store = PanelStore::<RequestConfig>::from_node(&node);
    store.bind(graph.clone(), "api-1");
    store.set_retry_count(2);

    let converted = converter.convert_matching(&mut graph.write().unwrap(), "*").unwrap();
    println!("Converted nodes: {:?}", converted);

    for id in converted {
        let graph = graph.read().unwrap();
        let node = graph.node(&id).unwrap();
        println!("// {} ({})", node.name, node.id);
        println!("{}\n", node.content.as_ref().unwrap()["source"].as_str().unwrap());
    }
}
