/*
[INPUT]:  Sandbox credentials from the environment
[OUTPUT]: A user, its OAuth key and its nodes printed to stdout
[POS]:    Examples - end-to-end sandbox walkthrough
[UPDATE]: When the client flow changes
*/

use std::env;

use synapse_client::*;

/// Example: look up a user, obtain an OAuth key and list their nodes
///
/// Required environment:
/// SYNAPSE_CLIENT_ID, SYNAPSE_CLIENT_SECRET, SYNAPSE_FINGERPRINT, SYNAPSE_USER_ID
/// Optional: SYNAPSE_IP (defaults to 127.0.0.1), SYNAPSE_MFA_PIN
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Synapse Sandbox Example ===\n");

    let (Ok(client_id), Ok(client_secret), Ok(fingerprint), Ok(user_id)) = (
        env::var("SYNAPSE_CLIENT_ID"),
        env::var("SYNAPSE_CLIENT_SECRET"),
        env::var("SYNAPSE_FINGERPRINT"),
        env::var("SYNAPSE_USER_ID"),
    ) else {
        eprintln!("Set SYNAPSE_CLIENT_ID, SYNAPSE_CLIENT_SECRET, SYNAPSE_FINGERPRINT and SYNAPSE_USER_ID");
        return;
    };

    let credentials = Credentials {
        client_id,
        client_secret,
        fingerprint,
        ip_address: env::var("SYNAPSE_IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
        environment: Environment::from_devmode(true),
    };

    let client = match SynapseClient::new(credentials) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created against {}", client.http().base_url());

    let user = match client.get_user(&user_id, true).await {
        Ok(u) => u,
        Err(e) => {
            eprintln!("Failed to get user: {}", e);
            return;
        }
    };
    println!("✓ User {} ({:?})", user.id(), user.legal_names());

    let mut manager = match user.token_manager() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("User cannot authenticate: {}", e);
            return;
        }
    };

    match manager.ensure_token().await {
        Ok(token) => println!("✓ OAuth key valid until {}", token.expires_at),
        Err(SynapseError::ChallengeRequired { phone_numbers, .. }) => {
            let Some(device) = phone_numbers.first() else {
                eprintln!("Challenge issued without any device");
                return;
            };
            if let Err(e) = manager.select_device(device).await {
                eprintln!("Failed to request MFA code: {}", e);
                return;
            }
            let Ok(pin) = env::var("SYNAPSE_MFA_PIN") else {
                println!("MFA code sent to {device}; rerun with SYNAPSE_MFA_PIN set");
                return;
            };
            if let Err(e) = manager.refresh(Some(&pin)).await {
                eprintln!("MFA answer rejected: {}", e);
                return;
            }
            println!("✓ OAuth key obtained after MFA");
        }
        Err(e) => {
            eprintln!("OAuth failed: {}", e);
            return;
        }
    }

    match user.get_all_nodes(&ListQuery::new().per_page(20)).await {
        Ok(nodes) => {
            println!("✓ {} node(s), page {}/{}", nodes.total(), nodes.page(), nodes.page_count());
            for node in &nodes {
                println!("  - {} [{}] {}", node.id(), node.node_type(), node.path());
            }
        }
        Err(e) => eprintln!("Failed to list nodes: {}", e),
    }

    println!("\n✓ Example complete");
}
