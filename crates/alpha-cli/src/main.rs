mod terminal;

use alpha_models::{ContactRequest, LoginRequest, RegisterRequest, ServiceId};
use alpha_sdk::AlphaClient;
use alpha_site::auth::{self, FormOutcome, Tone};
use alpha_site::booking::{self, BookOutcome, BookingsView};
use alpha_site::{estimators, ChatWidget, WidgetConfig};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::terminal::{parse_input, plain_text, Input, TerminalCheckout, TerminalHost};

#[derive(Parser, Debug)]
#[command(name = "alpha-cli")]
#[command(about = "Alpha Fitness from the terminal: chat, estimators and bookings")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "ALPHA_URL", default_value = "http://localhost:5000")]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Talk to the site assistant
    Chat {
        /// Message sent automatically once the chat opens
        #[arg(long)]
        preference: Option<String>,
    },
    /// Body mass index and weight category
    Bmi {
        /// Weight in kilograms
        #[arg(long)]
        weight: String,
        /// Height in metres
        #[arg(long)]
        height: String,
    },
    /// Calories burned by an activity
    Calories {
        /// running, cycling, yoga, walking or anything else
        #[arg(long, default_value = "other")]
        activity: String,
        /// Duration in whole minutes
        #[arg(long)]
        minutes: String,
    },
    /// Book a session with a trainer through the chat
    Trainer {
        /// Trainer name
        name: String,
    },
    /// List the services on offer
    Services,
    /// Create an account
    Register {
        #[arg(long)]
        fullname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Book a service and start its payment
    Book {
        /// Service id from `services`
        service_id: u64,
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Show your bookings
    Bookings {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Args, Debug)]
pub struct Credentials {
    /// Account email
    #[arg(long, env = "ALPHA_EMAIL")]
    pub email: String,
    /// Account password
    #[arg(long, env = "ALPHA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = AlphaClient::new(&cli.base_url)?;

    match cli.command {
        Commands::Chat { preference } => chat(preference.as_deref()).await?,
        Commands::Bmi { weight, height } => {
            let result = estimators::bmi_form(&weight, &height);
            println!("{}", plain_text(&result.html));
            if let Some(preference) = result.consult {
                println!("Consult a trainer: alpha-cli chat --preference {preference}");
            }
        }
        Commands::Calories { activity, minutes } => {
            println!("{}", plain_text(&estimators::calorie_form(&activity, &minutes).html));
        }
        Commands::Trainer { name } => {
            println!("{}", booking_chat_intro(&name));
            chat(Some(&estimators::trainer_preference(&name))).await?;
        }
        Commands::Services => {
            let services = client.services().await.context("could not load services")?;
            for service in services {
                println!("#{} {} ₹{}", service.id, service.name, service.price_inr);
                if let Some(description) = service.description {
                    println!("    {description}");
                }
            }
        }
        Commands::Register {
            fullname,
            email,
            password,
        } => {
            let req = RegisterRequest {
                fullname,
                email,
                password,
            };
            report(&auth::submit_register(&client, &req).await)?;
        }
        Commands::Book {
            service_id,
            credentials,
        } => {
            login(&client, credentials).await?;
            let mut checkout = TerminalCheckout;
            let outcome =
                booking::book_service(&client, Some(&mut checkout), ServiceId::new(service_id))
                    .await;
            if let Some(alert) = outcome.alert() {
                bail!("{alert}");
            }
            if let BookOutcome::CheckoutOpened(options) = outcome {
                info!(order = %options.order_id, "checkout started");
                let (alert, _) = booking::payment_completed();
                println!("{alert}");
            }
        }
        Commands::Bookings { credentials } => {
            login(&client, credentials).await?;
            match booking::load_bookings(&client).await {
                BookingsView::List(bookings) => {
                    for b in bookings {
                        println!(
                            "#{} {} x{} ₹{} {} ({})",
                            b.id,
                            b.service,
                            b.quantity,
                            b.amount_rupees,
                            b.status,
                            b.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
                other => println!("{}", plain_text(&other.to_html())),
            }
        }
        Commands::Contact {
            name,
            email,
            message,
        } => {
            let req = ContactRequest {
                name,
                email,
                message,
            };
            println!("{}", auth::submit_contact(&client, &req).await);
        }
    }

    Ok(())
}

fn booking_chat_intro(trainer: &str) -> String {
    format!("Opening the chat to book {trainer}. Type /quit to leave.")
}

/// Run the chat widget on the terminal until stdin closes or `/quit`.
async fn chat(preference: Option<&str>) -> anyhow::Result<()> {
    let (widget, handle) = ChatWidget::mount(&mut TerminalHost, WidgetConfig::default())
        .context("chat could not be mounted")?;
    let running = tokio::spawn(widget.run());

    handle.open(preference);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Quit => break,
            Input::Event(event) => handle.dispatch(event),
        }
    }

    drop(handle);
    let widget = running.await?;
    info!(
        messages = widget.session().transcript().len(),
        "chat closed"
    );
    Ok(())
}

async fn login(client: &AlphaClient, credentials: Credentials) -> anyhow::Result<()> {
    let req = LoginRequest {
        email: credentials.email,
        password: credentials.password,
    };
    report(&auth::submit_login(client, &req).await)
}

/// Print a form outcome; an error tone fails the command.
fn report(outcome: &FormOutcome) -> anyhow::Result<()> {
    match outcome.message.tone {
        Tone::Success => {
            println!("{}", outcome.message.text);
            Ok(())
        }
        Tone::Error => bail!("{}", outcome.message.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_estimator_commands() {
        let cli = Cli::try_parse_from(["alpha-cli", "bmi", "--weight", "70", "--height", "1.75"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Bmi { ref weight, .. } if weight == "70"));

        let cli = Cli::try_parse_from(["alpha-cli", "calories", "--minutes", "30"]).unwrap();
        assert!(matches!(cli.command, Commands::Calories { ref activity, .. } if activity == "other"));
    }

    #[test]
    fn base_url_flag_overrides_default() {
        let cli = Cli::try_parse_from(["alpha-cli", "--base-url", "http://example.test", "services"])
            .unwrap();
        assert_eq!(cli.base_url, "http://example.test");
    }

    #[test]
    fn book_takes_credentials() {
        let cli = Cli::try_parse_from([
            "alpha-cli",
            "book",
            "2",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
        ])
        .unwrap();
        match cli.command {
            Commands::Book {
                service_id,
                credentials,
            } => {
                assert_eq!(service_id, 2);
                assert_eq!(credentials.email, "ada@example.com");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn failed_form_fails_the_command() {
        let outcome = FormOutcome {
            message: auth::FormMessage {
                text: "Invalid email or password".into(),
                tone: Tone::Error,
            },
            follow_up: auth::FollowUp::Stay,
        };
        let err = report(&outcome).unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }
}
