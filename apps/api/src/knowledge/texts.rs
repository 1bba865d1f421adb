// Built-in reference documents.
// The mentor persona only falls back to DEFAULT_CURRICULUM when its file is missing;
// the consultant persona always uses SUSTAINABILITY_FRAMEWORK.

/// Curriculum used when the configured curriculum file cannot be read.
pub const DEFAULT_CURRICULUM: &str = r#"# Software Engineering Foundations

## Module 1: Programming Fundamentals
- Variables, types, and control flow
- Functions, modules, and code organisation
- Reading and writing files

## Module 2: Data Structures and Algorithms
- Arrays, lists, maps, and sets
- Searching and sorting
- Complexity analysis (Big-O)

## Module 3: Working with APIs
- HTTP fundamentals and REST conventions
- JSON serialisation
- Authentication with API keys and tokens

## Module 4: Applied Machine Learning
- Prompting large language models
- Building retrieval-augmented applications
- Evaluating model output

## Module 5: Shipping Software
- Version control with git
- Testing and continuous integration
- Deploying and monitoring a service"#;

/// Sustainability framework embedded into every consultant system instruction.
pub const SUSTAINABILITY_FRAMEWORK: &str = r#"# Corporate Sustainability Framework

## 1. Environmental Stewardship
- Greenhouse gas accounting across Scope 1, 2, and 3 emissions
- Energy efficiency and transition to renewable sources
- Water stewardship and waste reduction through circular design
- Biodiversity and land-use impact assessment

## 2. Social Responsibility
- Fair labour practices and supply-chain due diligence
- Diversity, equity, and inclusion programmes
- Community engagement and local economic development
- Health, safety, and employee wellbeing

## 3. Governance
- Board oversight of sustainability risks and opportunities
- Transparent ESG reporting aligned with recognised standards (GRI, SASB, TCFD)
- Ethics, anti-corruption, and stakeholder accountability

## 4. Economic Value Creation
- Sustainable product and service innovation
- Green financing and sustainability-linked investment
- Cost savings from resource efficiency
- Long-term resilience against climate and regulatory risk

## 5. Implementation Lifecycle
- Materiality assessment and baseline measurement
- Target setting (science-based where possible)
- Programme delivery, monitoring, and continuous improvement"#;
