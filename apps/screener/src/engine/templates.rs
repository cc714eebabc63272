use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobTemplate {
    pub role: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const JOB_TEMPLATES: &[JobTemplate] = &[
    JobTemplate {
        role: "python_dev",
        title: "Python Developer",
        description: "Python developer with strong experience in Django or Flask, REST API \
            design, SQL databases, automated testing and Git. Familiarity with Docker and \
            cloud deployment on AWS is a plus.",
    },
    JobTemplate {
        role: "data_scientist",
        title: "Data Scientist",
        description: "Data scientist skilled in Python, Pandas, NumPy and scikit-learn, with \
            experience in statistics, machine learning, data visualization and SQL. \
            Communicates insights to business stakeholders.",
    },
    JobTemplate {
        role: "ml_engineer",
        title: "Machine Learning Engineer",
        description: "Machine learning engineer experienced with PyTorch or TensorFlow, deep \
            learning, NLP, model deployment, MLOps pipelines, Docker, Kubernetes and cloud \
            platforms.",
    },
    JobTemplate {
        role: "frontend_dev",
        title: "Frontend Developer",
        description: "Frontend developer proficient in JavaScript, TypeScript, React, HTML and \
            CSS, with responsive design, accessibility, REST API integration and testing \
            experience.",
    },
    JobTemplate {
        role: "backend_dev",
        title: "Backend Developer",
        description: "Backend developer with experience building scalable services in Java, \
            Go or Node.js, REST API and microservices design, PostgreSQL, Redis, message \
            queues, Docker and CI/CD.",
    },
];

pub fn template(role: &str) -> Option<&'static JobTemplate> {
    JOB_TEMPLATES.iter().find(|t| t.role == role)
}

/// A non-blank job description wins; otherwise a known role's template is used.
pub fn resolve_job_description(
    role: Option<&str>,
    job_description: Option<&str>,
) -> Result<String, AppError> {
    if let Some(jd) = job_description.map(str::trim).filter(|jd| !jd.is_empty()) {
        return Ok(jd.to_string());
    }

    match role.map(str::trim).filter(|r| !r.is_empty()) {
        Some(role) => template(role)
            .map(|t| t.description.to_string())
            .ok_or_else(|| AppError::Validation(format!("Unknown job role '{role}'"))),
        None => Err(AppError::Validation(
            "A job description or a known job role is required".to_string(),
        )),
    }
}
