use crate::models::race::DriverInfo;

const DEFAULT_COLOR: &str = "#777777";

fn driver_team(driver_id: &str) -> Option<&'static str> {
    match driver_id {
        "max_verstappen" | "sergio_perez" => Some("red_bull"),
        "lewis_hamilton" | "george_russell" => Some("mercedes"),
        "charles_leclerc" | "carlos_sainz" => Some("ferrari"),
        "lando_norris" => Some("mclaren"),
        "pierre_gasly" | "esteban_ocon" => Some("alpine"),
        "fernando_alonso" => Some("aston_martin"),
        _ => None,
    }
}

fn team_color(team: &str) -> Option<&'static str> {
    match team {
        "red_bull" => Some("#0600EF"),
        "mercedes" => Some("#00D2BE"),
        "ferrari" => Some("#DC0000"),
        "mclaren" => Some("#FF8700"),
        "alpine" => Some("#0090FF"),
        "aston_martin" => Some("#006F62"),
        _ => None,
    }
}

/// Turn an upstream driver id into a display name: separators become
/// spaces and each word is capitalized.
pub fn display_name(driver_id: &str) -> String {
    driver_id
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Static lookup used to decorate responses. Unknown ids still produce a
/// usable record.
pub fn driver_info(driver_id: &str) -> DriverInfo {
    let team = driver_team(driver_id).unwrap_or("unknown");
    DriverInfo {
        id: driver_id.to_string(),
        name: display_name(driver_id),
        team: team.to_string(),
        color: team_color(team).unwrap_or(DEFAULT_COLOR).to_string(),
    }
}
