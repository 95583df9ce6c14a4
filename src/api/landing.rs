//! Marketing landing page content. Static payload, no storage access.

use axum::Json;
use serde_json::{json, Value};

/// GET /api/landing - Content blocks for the marketing landing page
pub async fn get_landing() -> Json<Value> {
    Json(json!({
        "data": {
            "hero": {
                "eyebrow": "ERP Cloud Platform",
                "title": "Orchestrate every workflow from a single command center.",
                "subtitle": "Modern finance, inventory, HR, and operations that speak the same language. Designed for regional regulations, delivered with enterprise polish.",
                "primaryCta": { "label": "Start for free", "href": "/register" },
                "secondaryCta": { "label": "Watch the demo", "href": "#demo" },
                "stats": [
                    { "label": "Active companies", "value": "120+" },
                    { "label": "Time to deploy", "value": "< 12 days" },
                    { "label": "Manager satisfaction", "value": "9.6 / 10" }
                ]
            },
            "demo": {
                "title": "A live view of how your organization performs",
                "description": "Real-time dashboards surface sales, purchasing, production and HR flows the moment they happen.",
                "highlights": [
                    "Responsive, multilingual interface",
                    "Live, shareable reporting",
                    "Full integration with existing financial systems"
                ],
                "media": "/product.jpg"
            },
            "features": [
                {
                    "title": "Advanced financial planning",
                    "description": "Accounting automation and cash management in real time.",
                    "icon": "LineChart",
                    "detail": "Bank synchronization and statutory reports without spreadsheets."
                },
                {
                    "title": "Intelligent warehousing",
                    "description": "Automatic lot tracking, stock levels and shortage alerts.",
                    "icon": "Boxes",
                    "detail": "Smart reorder suggestions and stocktaking by scanner or phone."
                },
                {
                    "title": "Sales workroom",
                    "description": "Built-in CRM, contract management and team commissions.",
                    "icon": "Handshake",
                    "detail": "Interactive pipeline, lead scoring and direct WhatsApp/email outreach."
                },
                {
                    "title": "Security and compliance",
                    "description": "Fine-grained access levels and audit-ready reports.",
                    "icon": "ShieldCheck",
                    "detail": "Two-factor login, data encryption and full history for ISO and local regulation."
                }
            ],
            "whyUs": {
                "title": "Why operations teams trust our ERP",
                "description": "From discovery to onboarding, a dedicated success squad and proven playbooks help you unlock value fast.",
                "bullets": [
                    {
                        "title": "Localized processes out-of-the-box",
                        "text": "Finance and HR modules match regional tax laws, labor codes, and reporting templates."
                    },
                    {
                        "title": "Enterprise extensibility",
                        "text": "Use our documented SDK and API catalog to add custom modules without vendor lock-in."
                    },
                    {
                        "title": "Shared ownership",
                        "text": "Solution architects, change managers, and support engineers stay with you after go-live."
                    }
                ],
                "metrics": [
                    { "label": "Average ROI in year one", "value": "3.4x" },
                    { "label": "Productivity lift", "value": "58%" }
                ]
            },
            "pricing": {
                "title": "Plans that scale with you",
                "description": "Transparent per-active-user pricing. Every plan includes support and free updates.",
                "note": "Above 250 users, talk to sales for a custom offer.",
                "plans": [
                    {
                        "name": "Start",
                        "price": 0,
                        "period": "monthly",
                        "description": "The best option for new teams.",
                        "features": ["5 active users", "Core sales, inventory and finance modules", "Email support"],
                        "ctaLabel": "Start for free",
                        "ctaHref": "/register"
                    },
                    {
                        "name": "Growth",
                        "price": 39,
                        "period": "per user / month",
                        "description": "Advanced automation and analytical reporting.",
                        "features": ["Unlimited users", "Automation engine", "Priority support"],
                        "highlighted": true,
                        "badge": "Popular",
                        "ctaLabel": "Choose Growth",
                        "ctaHref": "/register"
                    }
                ]
            }
        }
    }))
}
