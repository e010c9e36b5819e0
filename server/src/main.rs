#[macro_use]
extern crate rocket;

mod configuration;
#[cfg(test)]
mod test_helpers;
mod webserver;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    webserver::main().await
}
