use anyhow::Result;

use crate::repositories::{NewPrompt, PromptRepository};

#[derive(Debug, Clone, Copy)]
pub struct SeedPrompt {
    pub text: &'static str,
    pub category: &'static str,
    pub difficulty: &'static str,
}

/// Demo catalogue shipped with the game.
pub const SEED_PROMPTS: &[SeedPrompt] = &[
    SeedPrompt {
        text: "Droplets are scalable virtual machines that launch in seconds. Deploy your application on DigitalOcean and scale with confidence.",
        category: "droplets",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Spin up a Droplet in just 55 seconds. Choose from multiple Linux distributions or deploy your own custom image.",
        category: "droplets",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "DigitalOcean Droplets offer predictable pricing with no surprise bills. Start with basic plans and scale as you grow.",
        category: "droplets",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Kubernetes simplifies container orchestration. DigitalOcean Kubernetes lets you deploy and manage containerized applications effortlessly.",
        category: "kubernetes",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Deploy a managed Kubernetes cluster in minutes. Focus on building apps while we handle the infrastructure complexity.",
        category: "kubernetes",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "Scale your containers automatically with Kubernetes autoscaling. Handle traffic spikes without manual intervention.",
        category: "kubernetes",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "App Platform is a fully managed solution. Push your code and let DigitalOcean handle the infrastructure, scaling, and security.",
        category: "app-platform",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Deploy from GitHub with automatic builds. Every push triggers a new deployment keeping your app always up to date.",
        category: "app-platform",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "App Platform supports Node.js, Python, Go, Ruby, PHP, and static sites. Deploy your favorite framework with zero configuration.",
        category: "app-platform",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Managed databases remove operational burden. Focus on your application while DigitalOcean handles backups, updates, and failover.",
        category: "databases",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Choose from PostgreSQL, MySQL, Redis, or MongoDB. All managed databases include automated backups and point-in-time recovery.",
        category: "databases",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Database clusters provide high availability with automatic failover. Your data stays safe even when hardware fails.",
        category: "databases",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Spaces object storage is S3-compatible. Store and serve large amounts of data with built-in CDN for fast global delivery.",
        category: "spaces",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Store images, videos, and backups in Spaces. Pay only for what you use with simple predictable pricing.",
        category: "spaces",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "The cloud is not just someone elses computer. It is a global network of data centers working together to serve your users.",
        category: "general",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "Infrastructure as code lets you version control your servers. Reproducible deployments reduce errors and speed up recovery.",
        category: "general",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Continuous integration and continuous deployment automate your workflow. Ship features faster with confidence.",
        category: "general",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Load balancers distribute traffic across multiple servers. High availability means your app stays online even during failures.",
        category: "general",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Monitoring and alerting help you catch problems before users do. Set up dashboards and get notified when metrics cross thresholds.",
        category: "general",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Virtual private clouds isolate your resources from other users. Network security starts with proper isolation and firewall rules.",
        category: "general",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "The best developers ship code daily. Modern cloud platforms remove friction so you can focus on building great products.",
        category: "general",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "APIs power the modern web. RESTful services and GraphQL endpoints let applications communicate seamlessly across the internet.",
        category: "general",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Containers package your application with all its dependencies. Build once and run anywhere with consistent behavior.",
        category: "general",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "Serverless functions run code without managing servers. Pay only for execution time and scale automatically to zero.",
        category: "general",
        difficulty: "medium",
    },
    SeedPrompt {
        text: "Git is the foundation of modern software development. Branch, commit, merge, and collaborate with developers worldwide.",
        category: "general",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "Every expert was once a beginner. Keep typing, keep learning, and watch your skills grow with every keystroke.",
        category: "general",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "The command line is your superpower. Master the terminal and unlock the full potential of your development environment.",
        category: "general",
        difficulty: "easy",
    },
    SeedPrompt {
        text: "Debugging is like being a detective in a crime movie where you are also the murderer. Happy coding!",
        category: "general",
        difficulty: "easy",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub added: u32,
    pub total: u64,
}

/// Inserts every catalogue prompt whose exact text is not stored yet.
pub async fn seed_prompts(prompts: &PromptRepository) -> Result<SeedReport> {
    let mut added = 0;
    for seed in SEED_PROMPTS {
        if prompts.exists_with_text(seed.text).await? {
            tracing::debug!("Skipping duplicate prompt: {}", seed.text);
            continue;
        }

        prompts
            .create(NewPrompt {
                text: seed.text.to_string(),
                category: seed.category.to_string(),
                difficulty: seed.difficulty.to_string(),
                is_active: true,
            })
            .await?;
        added += 1;
    }

    Ok(SeedReport {
        added,
        total: prompts.count().await?,
    })
}
