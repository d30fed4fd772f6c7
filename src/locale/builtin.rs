//! Compiled-in translations for the landing page

/// English
pub(super) const EN: &[(&str, &str)] = &[
    ("meta.title", "SCA - Symbiotic Cognitive Architecture"),
    (
        "meta.description",
        "Symbiotic Cognitive Architecture: a framework for human-AI collaboration built on MCP servers.",
    ),
    ("language.en", "EN"),
    ("language.ja", "日本語"),
    ("nav.home", "Home"),
    ("nav.features", "Features"),
    ("nav.architecture", "Architecture"),
    ("nav.quickstart", "Quick Start"),
    ("nav.github", "GitHub"),
    ("hero.title", "Symbiotic Cognitive Architecture"),
    ("hero.subtitle", "A cognitive framework where humans and AI think together."),
    ("hero.cta_start", "Get Started"),
    ("hero.cta_github", "View on GitHub"),
    ("features.title", "Core Components"),
    ("features.context.title", "Context Mapper"),
    (
        "features.context.description",
        "Maps the surrounding context of a problem before any reasoning starts.",
    ),
    ("features.decomposition.title", "Decomposition"),
    (
        "features.decomposition.description",
        "Breaks complex goals into tasks small enough to act on.",
    ),
    ("features.synthesis.title", "Synthesis"),
    (
        "features.synthesis.description",
        "Integrates partial results into a coherent answer.",
    ),
    ("features.memory.title", "Memory"),
    (
        "features.memory.description",
        "Keeps what was learned available for the next session.",
    ),
    ("architecture.title", "Architecture"),
    (
        "architecture.description",
        "Four cooperating MCP servers form one cognitive loop shared by human and AI.",
    ),
    ("quickstart.title", "Quick Start"),
    ("quickstart.install", "Clone the repository and start the servers:"),
    ("quickstart.copy", "Copy"),
    ("status.title", "Repository Status"),
    ("contact.title", "Get Involved"),
    ("contact.description", "Questions or ideas? We would love to hear from you."),
    ("contact.submit", "Send"),
    ("footer.copyright", "© 2025 SCA Project. Released under the MIT License."),
];

/// 日本語
pub(super) const JA: &[(&str, &str)] = &[
    ("meta.title", "SCA - 共生認知アーキテクチャ"),
    (
        "meta.description",
        "共生認知アーキテクチャ：MCP サーバーで構成される、人間と AI の協働のためのフレームワーク。",
    ),
    ("language.en", "EN"),
    ("language.ja", "日本語"),
    ("nav.home", "ホーム"),
    ("nav.features", "特徴"),
    ("nav.architecture", "アーキテクチャ"),
    ("nav.quickstart", "クイックスタート"),
    ("nav.github", "GitHub"),
    ("hero.title", "共生認知アーキテクチャ"),
    ("hero.subtitle", "人間と AI が共に考えるための認知フレームワーク。"),
    ("hero.cta_start", "はじめる"),
    ("hero.cta_github", "GitHub で見る"),
    ("features.title", "コアコンポーネント"),
    ("features.context.title", "コンテキストマッパー"),
    ("features.context.description", "推論を始める前に、問題を取り巻く文脈を整理します。"),
    ("features.decomposition.title", "分解"),
    ("features.decomposition.description", "複雑な目標を実行可能な小さなタスクに分解します。"),
    ("features.synthesis.title", "統合"),
    ("features.synthesis.description", "部分的な結果を一貫した答えにまとめます。"),
    ("features.memory.title", "記憶"),
    ("features.memory.description", "学んだことを次のセッションでも使えるよう保持します。"),
    ("architecture.title", "アーキテクチャ"),
    (
        "architecture.description",
        "4 つの MCP サーバーが協調し、人間と AI が共有する 1 つの認知ループを構成します。",
    ),
    ("quickstart.title", "クイックスタート"),
    ("quickstart.install", "リポジトリをクローンしてサーバーを起動します："),
    ("quickstart.copy", "コピー"),
    ("status.title", "リポジトリの状態"),
    ("contact.title", "参加する"),
    ("contact.description", "質問やアイデアがあれば、ぜひお聞かせください。"),
    ("contact.submit", "送信"),
    ("footer.copyright", "© 2025 SCA Project. MIT ライセンスで公開されています。"),
];
