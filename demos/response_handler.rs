//! The same todo client with a strict response handler: non-success
//! statuses become errors instead of raw responses.

use declarest::{handlers, params, Node, Result};

fn todo_client() -> Result<Node> {
    let client = Node::root("https://todos.example.com");

    // Every endpoint in the tree inherits the success check.
    client.set_handler(handlers::check_ok)?;

    client.get("health", "/__health")?;

    let todos = client.group("todos", "/todos")?;
    todos.get("all", "/")?;
    todos.get("one", "/:id")?;
    todos.post("create", "/")?;
    todos.put("update", "/:id")?;
    todos.delete("remove", "/:id")?;

    client.start();
    Ok(client)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "declarest=debug".into()),
        )
        .init();

    let client = todo_client()?;

    // With check_ok installed a failing health probe is an Err, so `?` is
    // all the status handling needed from here on.
    client.endpoint("health")?.call(params! {})?;

    let todos = client.subgroup("todos")?;

    for i in 0..5 {
        todos
            .endpoint("create")?
            .call(params! { value = format!("My thing to do #{i}") })?;
    }

    let all = todos.endpoint("all")?.call(params! {})?;
    let data = all.json();
    for todo in data.as_array().into_iter().flatten() {
        println!("{todo}");
    }

    let todo = todos.endpoint("one")?.call(params! { id = 1 })?.json();
    println!("{todo}");

    todos.endpoint("update")?.call(params! {
        id = 1,
        value = "I forgot. I meant to write this.",
    })?;

    todos.endpoint("remove")?.call(params! { id = 1 })?;

    Ok(())
}
