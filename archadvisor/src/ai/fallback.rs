//! Rule-based fallback report used when no provider answers.

use crate::ai::classifier::classify;

/// Source label attached to fallback responses
pub const FALLBACK_LABEL: &str = "Auto-Fallback";

/// Build the deterministic best-practice report for `user_input`.
pub fn fallback(user_input: &str) -> String {
    let architecture = classify(user_input);

    format!(
        r#"
## 🧠 Auto-Generated Architecture (Fallback Mode)

**Detected Architecture Type:**
{}

### Recommended Design
- Modular monolith (MVP friendly)
- Clear domain boundaries
- REST + async background jobs

### Database
- PostgreSQL (ACID, scalable)
- Redis for caching & queues

### Security
- JWT authentication
- Role-Based Access Control
- HTTPS everywhere

### Scalability
- Horizontal scaling
- Stateless services
- Load balancer + CDN

### Risks
- Cost spikes
- Scaling bottlenecks
- Security misconfigurations

---

⚠️ **No live model response was available.**
This report was generated from best-practice rules, not by a language model.

**Your Input:**
{}
"#,
        architecture.label(),
        user_input
    )
}
