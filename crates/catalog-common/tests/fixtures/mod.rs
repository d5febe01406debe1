#![allow(dead_code)]

use catalog_common::types::{Program, ProgramFields};

pub fn program(id: &str, title: &str) -> Program {
    Program {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} for everyday use"),
        platform: "Windows".to_string(),
        version: None,
        file_url: format!("https://example.com/{id}.zip"),
        icon_url: format!("https://example.com/{id}.png"),
        created_at: None,
        updated_at: None,
    }
}

pub fn fields(title: &str) -> ProgramFields {
    ProgramFields {
        title: title.to_string(),
        description: format!("{title} description"),
        platform: "Linux".to_string(),
        version: "1.0.0".to_string(),
        file_url: format!("https://github.com/acme/{}/releases", title.to_lowercase()),
        icon_url: format!("https://example.com/{}.png", title.to_lowercase()),
    }
}

/// Three records in store order (newest first).
pub fn security_tools() -> Vec<Program> {
    let mut nmap = program("nmap", "Nmap");
    nmap.description = "Network scanner".to_string();
    nmap.platform = "CLI".to_string();
    nmap.version = Some("7.94".to_string());

    let mut wireshark = program("wireshark", "Wireshark");
    wireshark.description = "Packet analyzer".to_string();

    let mut burp = program("burp", "Burp Suite");
    burp.description = "Web proxy for testing".to_string();
    burp.platform = "Java".to_string();
    burp.version = Some(String::new());

    vec![nmap, wireshark, burp]
}

pub fn titles(programs: &[&Program]) -> Vec<String> {
    programs.iter().map(|p| p.title.clone()).collect()
}
