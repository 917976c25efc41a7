use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use colored::*;
use reqwest::Client;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚜 Forklift Checklist smoke check".bright_blue().bold());
    println!("{}", "=================================".bright_blue());
    println!();

    let base = prompt("Server URL [http://localhost:3000]: ")?;
    let base = if base.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        base.trim_end_matches('/').to_string()
    };

    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

    loop {
        println!();
        println!("{}", "📋 MENU".bright_green().bold());
        println!("{}", "=======".bright_green());
        println!("1. ❤️  Health");
        println!("2. 👥 Employees");
        println!("3. 🔎 Forklift status");
        println!("4. 📝 Submit an all-PASS checklist");
        println!("5. 🚫 Missing vehicles today");
        println!("6. 📊 Daily summary");
        println!("7. 🧑 Driver activity");
        println!("8. 📄 Driver reports");
        println!("9. 🚪 Quit");

        let choice = prompt("Choose (1-9): ")?;
        let outcome = match choice.as_str() {
            "1" => get(&client, &format!("{base}/health"), &[]).await,
            "2" => get(&client, &format!("{base}/api/employees"), &[]).await,
            "3" => {
                let forklift = prompt("forkliftCode: ")?;
                let employee = prompt("employeeCode (optional): ")?;
                get(
                    &client,
                    &format!("{base}/api/forklift/status"),
                    &[("forkliftCode", forklift.as_str()), ("employeeCode", employee.as_str())],
                )
                .await
            }
            "4" => {
                let forklift = prompt("forkliftCode: ")?;
                let employee = prompt("employeeCode: ")?;
                let name = prompt("employeeName: ")?;
                let body = json!({
                    "forkliftCode": forklift,
                    "employeeCode": employee,
                    "employeeName": name,
                    "answers": vec!["PASS"; 11],
                    "issueDescription": ""
                });
                post(&client, &format!("{base}/api/checklist/submit"), &body).await
            }
            "5" => get(&client, &format!("{base}/api/admin/missing"), &[]).await,
            "6" => {
                let days = prompt("days [30]: ")?;
                let days = if days.is_empty() { "30".to_string() } else { days };
                get(&client, &format!("{base}/api/admin/summary"), &[("days", days.as_str())]).await
            }
            "7" => {
                let date = prompt("date YYYY-MM-DD (optional): ")?;
                get(&client, &format!("{base}/api/admin/drivers"), &[("date", date.as_str())]).await
            }
            "8" => {
                let employee = prompt("employeeCode: ")?;
                let date = prompt("date YYYY-MM-DD (optional): ")?;
                get(
                    &client,
                    &format!("{base}/api/admin/driver-reports"),
                    &[("employeeCode", employee.as_str()), ("date", date.as_str())],
                )
                .await
            }
            "9" => {
                println!("{}", "👋 Bye!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Invalid option.".bright_red());
                continue;
            }
        };

        if let Err(e) = outcome {
            println!("{} {}", "❌ Request failed:".bright_red(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn get(client: &Client, url: &str, params: &[(&str, &str)]) -> Result<()> {
    let params: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    println!("{} GET {} {:?}", "📤".bright_blue(), url, params);
    let response = client.get(url).query(&params).send().await?;
    print_response(response).await
}

async fn post(client: &Client, url: &str, body: &Value) -> Result<()> {
    println!("{} POST {}", "📤".bright_blue(), url);
    println!("{}", serde_json::to_string_pretty(body)?);
    let response = client.post(url).json(body).send().await?;
    print_response(response).await
}

async fn print_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let text = response.text().await?;

    let label = format!("📥 HTTP {status}");
    if status.is_success() {
        println!("{}", label.bright_green().bold());
    } else {
        println!("{}", label.bright_red().bold());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
