//! Minimal todo-API client: raw responses, no handlers.

use declarest::{params, Node, Result};

fn todo_client() -> Result<Node> {
    let client = Node::root("https://todos.example.com");

    // Health endpoint
    client.get("health", "/__health")?;

    // A group for everything under /todos
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

    // Check the API is up before doing anything else.
    let response = client.endpoint("health")?.call(params! {})?;
    if response.status != 200 {
        eprintln!("API is unhealthy: {}", response.status);
        return Ok(());
    }

    let todos = client.subgroup("todos")?;

    // Create a few todos; the POST body carries the leftover parameters.
    for i in 0..5 {
        let response = todos
            .endpoint("create")?
            .call(params! { value = format!("My thing to do #{i}") })?;
        if response.status != 201 {
            eprintln!("create failed with {}", response.status);
            return Ok(());
        }
    }

    // List them all.
    let response = todos.endpoint("all")?.call(params! {})?;
    let data = response.json();
    for todo in data.as_array().into_iter().flatten() {
        println!("{todo}");
    }

    // Fetch one, then update it.
    let response = todos.endpoint("one")?.call(params! { id = 1 })?;
    println!("{}", response.json());

    let response = todos.endpoint("update")?.call(params! {
        id = 1,
        value = "I forgot. I meant to write this.",
    })?;
    if response.status != 202 {
        eprintln!("could not update todo");
        return Ok(());
    }

    // Eh, who needs it.
    todos.endpoint("remove")?.call(params! { id = 1 })?;

    Ok(())
}
