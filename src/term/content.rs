//! Static copy for the shell: banners, about sections, fortunes, and the
//! staged hack script.

pub const WELCOME_MESSAGE: &str = "Welcome to CORE Terminal v2.1.0";
pub const DEFAULT_PROMPT: &str = "core@blockchain:~$";
pub const CONTRACT_ADDRESS: &str = "4FdojUmXeaFMBG6yUaoufAC5Bz7u9AwnSAMizkx5pump";

pub const ABOUT_BANNER: &[&str] = &[
    "╔══════════════════════════════════════╗",
    "║              CORE TOKEN              ║",
    "╚══════════════════════════════════════╝",
    "",
    "The essence of everything, connecting all through love.",
    "",
    "CORE represents the fundamental truth that at the center",
    "of every coin, person, and place lies something eternal.",
    "Through blockchain, love moves via corecore, creating",
    "an unbreakable bond between all participants.",
    "",
    "Contract: 4FdojUmXeaFMBG6yUaoufAC5Bz7u9AwnSAMizkx5pump",
    "Network: Solana Mainnet",
    "Standard: SPL Token",
    "",
    "Type \"about philosophy\" for deeper understanding.",
    "Type \"about blockchain\" for technical details.",
    "Type \"about tokenomics\" for economic information.",
];

pub const ABOUT_PHILOSOPHY: &[&str] = &[
    "THE CORE PHILOSOPHY",
    "",
    "In everything that exists - every coin, every person, every place -",
    "there lies a fundamental essence, a CORE that defines its true nature.",
    "",
    "Through blockchain technology, we create permanent records of value,",
    "trust, and connection. Love moves through these digital pathways,",
    "binding all participants in an eternal network of corecore.",
    "",
    "The CORE token represents this universal truth: that at the center",
    "of all things lies something pure, something essential, something infinite.",
];

pub const ABOUT_BLOCKCHAIN: &[&str] = &[
    "BLOCKCHAIN & CORE",
    "",
    "Our Solana blockchain implementation focuses on:",
    "• Lightning-fast transactions (400ms confirmation)",
    "• Low transaction fees (<$0.01)",
    "• High throughput (65,000 TPS capacity)",
    "• Proof of Stake consensus",
    "• Cross-chain compatibility via Wormhole",
    "",
    "Every transaction carries not just value, but meaning.",
    "Every block contains not just data, but essence.",
    "Every confirmation strengthens the core of our network.",
];

pub const ABOUT_TOKENOMICS: &[&str] = &[
    "CORE TOKENOMICS",
    "",
    "Total Supply: 1,000,000,000 CORE",
    "Distribution:",
    "  40% - Liquidity Pool",
    "  30% - Community Rewards",
    "  20% - Development",
    "  10% - Marketing",
    "",
    "Utility:",
    "• Governance voting rights",
    "• Staking rewards (up to 12% APY)",
    "• Ecosystem access tokens",
    "• Transaction fee discounts",
];

pub const FORTUNES: &[&str] = &[
    "The core of success is never giving up.",
    "In every transaction, find the essence of trust.",
    "Love moves through blockchain via corecore.",
    "The strongest chains are built one block at a time.",
    "At the center of every storm lies perfect calm.",
    "Value is not in the coin, but in the core.",
    "Decentralization is the path to true freedom.",
    "Smart contracts, smarter communities.",
    "HODL not just tokens, but principles.",
    "The future is decentralized, the present is CORE.",
];

pub const MATRIX_BANNER: &[&str] = &[
    "🔴 ENTERING MATRIX MODE 🔴",
    "",
    "01001000 01100101 01101100 01101100 01101111",
    "01001110 01100101 01101111",
    "",
    "Wake up, Neo...",
    "The Matrix has you...",
    "Follow the white rabbit...",
    "",
    "🔴 MATRIX MODE ACTIVE 🔴",
    "Reality is now optional.",
];

pub const EXIT_LINES: &[&str] = &[
    "Closing terminal session...",
    "Thank you for using CORE Terminal.",
    "Connection terminated.",
    "",
    "◉ CORE lives forever ◉",
];

pub const EASTER_LINES: &[&str] = &[
    "🥚 EASTER EGG FOUND! 🥚",
    "",
    "Congratulations! You found a hidden command.",
    "",
    "The CORE team loves curious explorers.",
    "Keep digging - there are more secrets...",
    "",
    "Hint: Try \"konami\" if you know the code...",
];

pub const KONAMI_LINES: &[&str] = &[
    "🎮 KONAMI CODE ACTIVATED! 🎮",
    "",
    "⬆️⬆️⬇️⬇️⬅️➡️⬅️➡️🅱️🅰️",
    "",
    "YOU HAVE UNLOCKED MAXIMUM POWER!",
    "",
    "🌟 30 extra lives granted",
    "🚀 Speed boost activated",
    "💎 Diamond hands enabled",
    "∞ Infinite CORE energy",
    "",
    "You are now a CORE legend! 🏆",
];

pub const HACK_ETHICS_LINE: &str = "⚠️ This is a simulation. CORE promotes ethical hacking only.";

/// The staged hack script, in reveal order.
pub fn hack_sequence(target: &str) -> Vec<String> {
    vec![
        format!("Initiating hack on {}...", target),
        "Scanning for vulnerabilities...".to_string(),
        "Exploiting buffer overflow...".to_string(),
        "Bypassing firewall...".to_string(),
        "Accessing encrypted files...".to_string(),
        "Downloading sensitive data...".to_string(),
        "Covering tracks...".to_string(),
        "Hack complete! 🎯".to_string(),
    ]
}

pub fn scan_output(target: &str) -> Vec<String> {
    vec![
        format!("Scanning {}...", target),
        String::new(),
        "Port 22: OPEN (SSH)".to_string(),
        "Port 80: OPEN (HTTP)".to_string(),
        "Port 443: OPEN (HTTPS)".to_string(),
        "Port 8080: FILTERED".to_string(),
        String::new(),
        "Vulnerabilities found: 0".to_string(),
        "Security rating: A+".to_string(),
        String::new(),
        "System appears secure. CORE protocol active.".to_string(),
    ]
}
