//! `vitrine doctor` — Diagnose configuration and provider health.

use vitrine_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Vitrine Doctor — System Diagnostics");
    println!("======================================\n");

    let mut issues = 0;

    // Check config
    match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");

            if config.admin.password.is_empty() {
                println!("  ⚠️  No admin password — set VITRINE_ADMIN_PASSWORD or admin.password");
                issues += 1;
            } else {
                println!("  ✅ Admin credentials configured");
            }

            if config.assistant.api_key.is_empty() {
                println!("  ⚠️  No API key — set VITRINE_API_KEY; chat will answer with an apology");
                issues += 1;
            } else {
                println!("  ✅ API key configured");

                // Reach the provider only when a key is present
                let provider = vitrine_providers::build_from_config(&config.assistant);
                match provider.health_check().await {
                    Ok(true) => println!("  ✅ Provider reachable ({})", provider.name()),
                    Ok(false) => {
                        println!("  ⚠️  Provider answered but reported unhealthy");
                        issues += 1;
                    }
                    Err(e) => {
                        println!("  ❌ Provider unreachable: {e}");
                        issues += 1;
                    }
                }
            }
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
